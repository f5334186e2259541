use crate::utils::text::parse_lines;
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 9, tags = ["2020"])]
pub struct Solver;

pub const PREAMBLE: usize = 25;

#[derive(Debug)]
pub struct SharedData {
    numbers: Vec<u64>,
    invalid: Option<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(SharedData {
            numbers: parse_lines(input, |line| Ok(line.parse()?))?,
            invalid: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        invalid_number(shared).map(|n| n.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let target = invalid_number(shared)?;
        encryption_weakness(&shared.numbers, target)
            .map(|n| n.to_string())
            .ok_or_else(|| {
                SolveError::SolveFailed(anyhow!("no contiguous range sums to {target}").into())
            })
    }
}

/// Part 1 answer, computed once and reused by part 2
fn invalid_number(shared: &mut SharedData) -> Result<u64, SolveError> {
    if let Some(n) = shared.invalid {
        return Ok(n);
    }
    let n = first_invalid(&shared.numbers, PREAMBLE)
        .ok_or_else(|| SolveError::SolveFailed(anyhow!("every number is valid").into()))?;
    shared.invalid = Some(n);
    Ok(n)
}

/// First number that is not the sum of two entries at different positions among the
/// `preamble` before it; equal values count as a pair
pub fn first_invalid(numbers: &[u64], preamble: usize) -> Option<u64> {
    numbers.windows(preamble + 1).find_map(|window| {
        let (previous, candidate) = (&window[..preamble], window[preamble]);
        let is_sum = previous
            .iter()
            .enumerate()
            .any(|(i, &a)| previous[i + 1..].iter().any(|&b| a + b == candidate));
        (!is_sum).then_some(candidate)
    })
}

/// Smallest plus largest of a contiguous run of at least two numbers summing to `target`
pub fn encryption_weakness(numbers: &[u64], target: u64) -> Option<u64> {
    let (mut start, mut sum) = (0, 0);
    for end in 0..numbers.len() {
        sum += numbers[end];
        while sum > target && start < end {
            sum -= numbers[start];
            start += 1;
        }
        if sum == target && end > start {
            let range = &numbers[start..=end];
            let (min, max) = range.iter().fold((u64::MAX, 0), |(lo, hi), &n| {
                (lo.min(n), hi.max(n))
            });
            return Some(min + max);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
35
20
15
25
47
40
62
55
65
95
102
117
150
182
127
219
299
277
309
576
";

    #[test]
    fn example_with_short_preamble() {
        let shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(first_invalid(&shared.numbers, 5), Some(127));
        assert_eq!(encryption_weakness(&shared.numbers, 127), Some(62));
    }

    #[test]
    fn part2_reuses_part1_result() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        shared.invalid = Some(127);
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "62");
    }

    #[test]
    fn single_number_is_not_a_range() {
        assert_eq!(encryption_weakness(&[1, 127, 3], 127), None);
    }

    #[test]
    fn equal_entries_form_a_pair() {
        assert_eq!(first_invalid(&[5, 5, 1, 2, 3, 10], 5), None);
        assert_eq!(first_invalid(&[5, 5, 1, 2, 3, 11], 5), Some(11));
    }

    #[test]
    fn all_valid_fails() {
        let input: String = (1..=30).map(|n| format!("{n}\n")).collect();
        let mut shared = Solver::parse(&input).unwrap();
        // 26 onwards are sums of two earlier, distinct numbers
        assert!(matches!(
            <Solver as PartSolver<1>>::solve(&mut shared),
            Err(SolveError::SolveFailed(_))
        ));
    }
}
