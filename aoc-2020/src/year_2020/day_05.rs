use crate::utils::text::parse_lines;
use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 5, tags = ["2020"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Seat {
    row: u16,
    column: u16,
}

impl Seat {
    pub fn id(self) -> u16 {
        self.row * 8 + self.column
    }
}

/// Decode a boarding pass: 7 row characters (F/B) then 3 column characters (L/R)
///
/// Both halves are binary numbers with B and R as 1.
pub fn decode(pass: &str) -> anyhow::Result<Seat> {
    if pass.len() != 10 || !pass.is_ascii() {
        bail!("boarding pass must be 10 ASCII characters, got {pass:?}");
    }
    let bits = |s: &str, zero: u8, one: u8| {
        s.bytes().try_fold(0u16, |acc, b| match b {
            b if b == zero => Ok(acc << 1),
            b if b == one => Ok(acc << 1 | 1),
            other => Err(anyhow!("unexpected character {:?}", other as char)),
        })
    };
    let (row, column) = pass.split_at(7);
    Ok(Seat {
        row: bits(row, b'F', b'B')?,
        column: bits(column, b'L', b'R')?,
    })
}

impl AocParser for Solver {
    /// Seat ids, sorted ascending
    type SharedData<'a> = Vec<u16>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut ids = parse_lines(input, |line| Ok(decode(line)?.id()))?;
        ids.sort_unstable();
        Ok(ids)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .last()
            .map(u16::to_string)
            .ok_or_else(|| SolveError::SolveFailed(anyhow!("no boarding passes").into()))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .windows(2)
            .find(|w| w[1] == w[0] + 2)
            .map(|w| (w[0] + 1).to_string())
            .ok_or_else(|| {
                SolveError::SolveFailed(anyhow!("no free seat between two taken seats").into())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve;

    #[test]
    fn decodes_examples() {
        let cases = [
            ("FBFBBFFRLR", 44, 5, 357),
            ("FFFBBBFRRR", 14, 7, 119),
            ("BBFFBBFRLL", 102, 4, 820),
            ("BFFFBBFRRR", 70, 7, 567),
        ];
        for (pass, row, column, id) in cases {
            let seat = decode(pass).unwrap();
            assert_eq!(seat, Seat { row, column }, "{pass}");
            assert_eq!(seat.id(), id, "{pass}");
        }
    }

    #[test]
    fn highest_id() {
        assert_eq!(solve::<Solver>("FBFBBFFRLR\nBFFFBBFRRR\nFFFBBBFRRR\nBBFFBBFRLL\n", 1), "820");
    }

    #[test]
    fn finds_gap() {
        // ids 356, 357, 359
        let input = "FBFBBFFRLL\nFBFBBFFRLR\nFBFBBFFRRR\n";
        assert_eq!(solve::<Solver>(input, 2), "358");
    }

    #[test]
    fn malformed_pass_is_parse_error() {
        assert!(Solver::parse("FBFBXFFRLR").is_err());
        assert!(Solver::parse("FBFBBFFRL").is_err());
        assert!(Solver::parse("FBFBBFFRLB").is_err());
    }
}
