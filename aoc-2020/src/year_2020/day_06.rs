use crate::utils::text::blocks;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 6, tags = ["2020"])]
pub struct Solver;

/// One bitmask of yes-answers (bit 0 = `a`) per person, grouped
pub type Groups = Vec<Vec<u32>>;

impl AocParser for Solver {
    type SharedData<'a> = Groups;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        blocks(input)
            .into_iter()
            .map(|people| {
                people
                    .into_iter()
                    .map(|answers| {
                        answers.bytes().try_fold(0u32, |mask, b| match b {
                            b'a'..=b'z' => Ok(mask | 1 << (b - b'a')),
                            other => Err(ParseError::InvalidFormat(format!(
                                "unexpected answer {:?}",
                                other as char
                            ))),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared
            .iter()
            .map(|group| group.iter().fold(0, |acc, m| acc | m).count_ones())
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared
            .iter()
            .map(|group| group.iter().fold(u32::MAX, |acc, m| acc & m).count_ones())
            .sum();
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve;

    const EXAMPLE: &str = "abc\n\na\nb\nc\n\nab\nac\n\na\na\na\na\n\nb\n";

    #[test]
    fn example_part1() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "11");
    }

    #[test]
    fn example_part2() {
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "6");
    }

    #[test]
    fn single_group_variants() {
        assert_eq!(solve::<Solver>("abcx\nabcy\nabcz", 1), "6");
        assert_eq!(solve::<Solver>("abcx\nabcy\nabcz", 2), "3");
    }

    #[test]
    fn uppercase_answer_is_rejected() {
        assert!(Solver::parse("abC").is_err());
    }
}
