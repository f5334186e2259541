use crate::utils::text::parse_lines;
use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 2, tags = ["2020"])]
pub struct Solver;

#[derive(Debug, PartialEq, Eq)]
pub struct Entry<'a> {
    lo: usize,
    hi: usize,
    letter: u8,
    password: &'a str,
}

impl Entry<'_> {
    fn valid_by_count(&self) -> bool {
        let count = self.password.bytes().filter(|&b| b == self.letter).count();
        (self.lo..=self.hi).contains(&count)
    }

    /// Exactly one of the 1-based positions `lo` and `hi` holds the letter
    fn valid_by_position(&self) -> bool {
        let at = |pos: usize| {
            pos.checked_sub(1)
                .and_then(|i| self.password.as_bytes().get(i))
                == Some(&self.letter)
        };
        at(self.lo) != at(self.hi)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Entry<'a>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let re = Regex::new(r"^(\d+)-(\d+) ([a-z]): ([a-z]+)$")
            .map_err(|e| ParseError::Other(e.to_string()))?;

        parse_lines(input, |line| {
            let (_, [lo, hi, letter, password]) = re
                .captures(line)
                .ok_or_else(|| anyhow!("expected `lo-hi letter: password`, got {line:?}"))?
                .extract();
            Ok(Entry {
                lo: lo.parse().context("policy minimum")?,
                hi: hi.parse().context("policy maximum")?,
                letter: letter.as_bytes()[0],
                password,
            })
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().filter(|e| e.valid_by_count()).count().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().filter(|e| e.valid_by_position()).count().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve;

    const EXAMPLE: &str = "1-3 a: abcde\n1-3 b: cdefg\n2-9 c: ccccccccc\n";

    #[test]
    fn example_part1() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "2");
    }

    #[test]
    fn example_part2() {
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "1");
    }

    #[test]
    fn parse_borrows_password() {
        let entries = Solver::parse("1-3 a: abcde").unwrap();
        assert_eq!(
            entries,
            vec![Entry {
                lo: 1,
                hi: 3,
                letter: b'a',
                password: "abcde"
            }]
        );
    }

    #[test]
    fn position_past_end_does_not_match() {
        let entry = Entry {
            lo: 1,
            hi: 30,
            letter: b'a',
            password: "ab",
        };
        assert!(entry.valid_by_position());
    }

    #[test]
    fn malformed_policy_is_rejected() {
        assert!(Solver::parse("1-3 a abcde").is_err());
    }
}
