use crate::utils::text::parse_lines;
use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{HashMap, HashSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 7, tags = ["2020", "graph"])]
pub struct Solver;

const TARGET: &str = "shiny gold";

/// Bag colour to the `(count, colour)` pairs it must directly contain
pub type Rules<'a> = HashMap<&'a str, Vec<(u64, &'a str)>>;

fn parse_rule(line: &str) -> anyhow::Result<(&str, Vec<(u64, &str)>)> {
    let (outer, contents) = line
        .split_once(" bags contain ")
        .ok_or_else(|| anyhow!("missing ' bags contain '"))?;
    let contents = contents.trim_end_matches('.');
    if contents == "no other bags" {
        return Ok((outer, Vec::new()));
    }
    let inner = contents
        .split(", ")
        .map(|item| -> anyhow::Result<(u64, &str)> {
            let item = item
                .strip_suffix(" bags")
                .or_else(|| item.strip_suffix(" bag"))
                .ok_or_else(|| anyhow!("bag item {item:?} does not end in 'bag(s)'"))?;
            let (count, colour) = item
                .split_once(' ')
                .ok_or_else(|| anyhow!("bag item {item:?} has no count"))?;
            Ok((count.parse().context("bag count")?, colour))
        })
        .collect::<anyhow::Result<_>>()?;
    Ok((outer, inner))
}

impl AocParser for Solver {
    type SharedData<'a> = Rules<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(parse_lines(input, parse_rule)?.into_iter().collect())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut parents: HashMap<&str, Vec<&str>> = HashMap::new();
        for (&outer, inner) in shared.iter() {
            for &(_, colour) in inner {
                parents.entry(colour).or_default().push(outer);
            }
        }

        let mut seen = HashSet::new();
        let mut stack = vec![TARGET];
        while let Some(colour) = stack.pop() {
            for &parent in parents.get(colour).into_iter().flatten() {
                if seen.insert(parent) {
                    stack.push(parent);
                }
            }
        }
        Ok(seen.len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut memo = HashMap::new();
        let total = bags_inside(shared, TARGET, &mut memo)
            .map_err(|e| SolveError::SolveFailed(e.into()))?;
        Ok(total.to_string())
    }
}

/// Total bags nested inside one `colour` bag, not counting itself
///
/// `None` in `memo` marks a colour still being expanded; meeting it again means
/// the rules contain a cycle.
fn bags_inside<'a>(
    rules: &Rules<'a>,
    colour: &'a str,
    memo: &mut HashMap<&'a str, Option<u64>>,
) -> anyhow::Result<u64> {
    match memo.get(colour) {
        Some(&Some(n)) => return Ok(n),
        Some(None) => bail!("{colour} bags end up containing themselves"),
        None => {}
    }
    memo.insert(colour, None);
    let mut total = 0u64;
    for &(count, inner) in rules.get(colour).into_iter().flatten() {
        total += count * (1 + bags_inside(rules, inner, memo)?);
    }
    memo.insert(colour, Some(total));
    Ok(total)
}
