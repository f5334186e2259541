use crate::utils::text::blocks;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 4, tags = ["2020"])]
pub struct Solver;

/// `cid` is deliberately absent
const REQUIRED: [&str; 7] = ["byr", "iyr", "eyr", "hgt", "hcl", "ecl", "pid"];

const EYE_COLOURS: [&str; 7] = ["amb", "blu", "brn", "gry", "grn", "hzl", "oth"];

pub type Passport<'a> = HashMap<&'a str, &'a str>;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Passport<'a>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        blocks(input)
            .into_iter()
            .map(|lines| {
                lines
                    .into_iter()
                    .flat_map(str::split_whitespace)
                    .map(|field| {
                        field.split_once(':').ok_or_else(|| {
                            ParseError::InvalidFormat(format!("field without ':': {field:?}"))
                        })
                    })
                    .collect::<Result<Passport<'a>, _>>()
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().filter(|p| has_required(p)).count().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let valid = shared
            .iter()
            .filter(|p| has_required(p))
            .filter(|p| p.iter().all(|(&key, &value)| field_is_valid(key, value)))
            .count();
        Ok(valid.to_string())
    }
}

fn has_required(passport: &Passport<'_>) -> bool {
    REQUIRED.iter().all(|key| passport.contains_key(key))
}

fn year_in(value: &str, lo: u32, hi: u32) -> bool {
    value.len() == 4 && value.parse().is_ok_and(|y: u32| (lo..=hi).contains(&y))
}

/// Unknown keys, including `cid`, are always valid
fn field_is_valid(key: &str, value: &str) -> bool {
    match key {
        "byr" => year_in(value, 1920, 2002),
        "iyr" => year_in(value, 2010, 2020),
        "eyr" => year_in(value, 2020, 2030),
        "hgt" => {
            if let Some(cm) = value.strip_suffix("cm") {
                cm.parse().is_ok_and(|h: u32| (150..=193).contains(&h))
            } else if let Some(inches) = value.strip_suffix("in") {
                inches.parse().is_ok_and(|h: u32| (59..=76).contains(&h))
            } else {
                false
            }
        }
        "hcl" => value.strip_prefix('#').is_some_and(|hex| {
            hex.len() == 6 && hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        }),
        "ecl" => EYE_COLOURS.contains(&value),
        "pid" => value.len() == 9 && value.bytes().all(|b| b.is_ascii_digit()),
        _ => true,
    }
}
