use crate::utils::text::parse_lines;
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 21, tags = ["2020"])]
pub struct Solver;

#[derive(Debug)]
pub struct Food<'a> {
    ingredients: BTreeSet<&'a str>,
    allergens: Vec<&'a str>,
}

#[derive(Debug)]
pub struct SharedData<'a> {
    foods: Vec<Food<'a>>,
    /// Ingredients that may contain each allergen
    candidates: BTreeMap<&'a str, BTreeSet<&'a str>>,
}

fn parse_food(line: &str) -> anyhow::Result<Food<'_>> {
    let (ingredients, allergens) = match line.split_once(" (contains ") {
        Some((ingredients, rest)) => {
            let allergens = rest
                .strip_suffix(')')
                .ok_or_else(|| anyhow!("unclosed allergen list"))?;
            (ingredients, allergens.split(", ").collect())
        }
        None => (line, Vec::new()),
    };
    Ok(Food {
        ingredients: ingredients.split_whitespace().collect(),
        allergens,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let foods = parse_lines(input, parse_food)?;
        let mut candidates: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for food in &foods {
            for &allergen in &food.allergens {
                candidates
                    .entry(allergen)
                    .and_modify(|set| set.retain(|i| food.ingredients.contains(i)))
                    .or_insert_with(|| food.ingredients.clone());
            }
        }
        Ok(SharedData { foods, candidates })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let suspicious: BTreeSet<&str> = shared.candidates.values().flatten().copied().collect();
        let safe = shared
            .foods
            .iter()
            .flat_map(|food| &food.ingredients)
            .filter(|i| !suspicious.contains(*i))
            .count();
        Ok(safe.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut open = shared.candidates.clone();
        let mut resolved: BTreeMap<&str, &str> = BTreeMap::new();
        loop {
            let next = open
                .iter()
                .find(|(_, set)| set.len() == 1)
                .and_then(|(&allergen, set)| Some((allergen, *set.first()?)));
            let Some((allergen, ingredient)) = next else {
                break;
            };
            resolved.insert(allergen, ingredient);
            open.remove(allergen);
            for set in open.values_mut() {
                set.remove(ingredient);
            }
        }
        if !open.is_empty() {
            let open = open.keys().collect::<Vec<_>>();
            return Err(SolveError::SolveFailed(
                anyhow!("allergens {open:?} cannot be resolved").into(),
            ));
        }
        // BTreeMap iterates in allergen order
        Ok(resolved.values().join(","))
    }
}
