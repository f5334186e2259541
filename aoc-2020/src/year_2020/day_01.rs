use crate::utils::text::parse_lines;
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::cmp::Ordering;

const TARGET: u32 = 2020;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 1, tags = ["2020"])]
pub struct Solver;

impl AocParser for Solver {
    /// Expense entries, sorted ascending
    type SharedData<'a> = Vec<u32>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut entries = parse_lines(input, |line| Ok(line.parse::<u32>()?))?;
        entries.sort_unstable();
        Ok(entries)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (a, b) = pair_with_sum(shared, TARGET).ok_or_else(|| {
            SolveError::SolveFailed(anyhow!("no two entries sum to {TARGET}").into())
        })?;
        Ok((a as u64 * b as u64).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .enumerate()
            .take_while(|&(_, &a)| a <= TARGET)
            .find_map(|(i, &a)| {
                pair_with_sum(&shared[i + 1..], TARGET - a)
                    .map(|(b, c)| a as u64 * b as u64 * c as u64)
            })
            .map(|product| product.to_string())
            .ok_or_else(|| {
                SolveError::SolveFailed(anyhow!("no three entries sum to {TARGET}").into())
            })
    }
}

/// Two entries of a sorted slice adding up to `target`, found by closing in from both ends
fn pair_with_sum(sorted: &[u32], target: u32) -> Option<(u32, u32)> {
    if sorted.len() < 2 {
        return None;
    }
    let (mut lo, mut hi) = (0, sorted.len() - 1);
    while lo < hi {
        match (u64::from(sorted[lo]) + u64::from(sorted[hi])).cmp(&u64::from(target)) {
            Ordering::Equal => return Some((sorted[lo], sorted[hi])),
            Ordering::Less => lo += 1,
            Ordering::Greater => hi -= 1,
        }
    }
    None
}
