use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 13, tags = ["2020", "math"])]
pub struct Solver;

#[derive(Debug)]
pub struct Notes {
    earliest: u64,
    /// `(offset, bus id)` for every listed bus, `x` entries skipped
    buses: Vec<(u64, u64)>,
}

/// Parse the comma separated schedule, keeping the offset of each running bus
pub fn parse_schedule(line: &str) -> Result<Vec<(u64, u64)>, ParseError> {
    line.trim()
        .split(',')
        .enumerate()
        .filter(|&(_, id)| id != "x")
        .map(|(offset, id)| match id.parse::<u64>() {
            Ok(0) | Err(_) => Err(ParseError::InvalidFormat(format!("bad bus id {id:?}"))),
            Ok(id) => Ok((offset as u64, id)),
        })
        .collect()
}

/// Earliest `t` where each bus `id` departs at `t + offset`
///
/// Sieves one bus at a time: once `t` satisfies the buses seen so far, stepping
/// by the product of their ids keeps them satisfied.
pub fn earliest_alignment(buses: &[(u64, u64)]) -> u64 {
    let mut t = 0;
    let mut step = 1;
    for &(offset, id) in buses {
        while (t + offset) % id != 0 {
            t += step;
        }
        step *= id;
    }
    t
}

impl AocParser for Solver {
    type SharedData<'a> = Notes;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut lines = input.lines().map(str::trim).filter(|l| !l.is_empty());
        let earliest = lines
            .next()
            .ok_or_else(|| ParseError::MissingData("earliest departure".into()))?;
        let earliest = earliest
            .parse()
            .map_err(|_| {
                ParseError::InvalidFormat(format!("(line 1) bad timestamp {earliest:?}"))
            })?;
        let schedule = lines
            .next()
            .ok_or_else(|| ParseError::MissingData("bus schedule".into()))?;
        Ok(Notes {
            earliest,
            buses: parse_schedule(schedule)?,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (wait, id) = shared
            .buses
            .iter()
            .map(|&(_, id)| ((id - shared.earliest % id) % id, id))
            .min()
            .ok_or_else(|| SolveError::SolveFailed(anyhow!("no buses in service").into()))?;
        Ok((wait * id).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(earliest_alignment(&shared.buses).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve;

    const EXAMPLE: &str = "939\n7,13,x,x,59,x,31,19\n";

    #[test]
    fn example_part1() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "295");
    }

    #[test]
    fn example_part2() {
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "1068781");
    }

    #[test]
    fn other_schedules() {
        let cases = [
            ("17,x,13,19", 3417),
            ("67,7,59,61", 754018),
            ("67,x,7,59,61", 779210),
            ("67,7,x,59,61", 1261476),
            ("1789,37,47,1889", 1202161486),
        ];
        for (schedule, expected) in cases {
            let buses = parse_schedule(schedule).unwrap();
            assert_eq!(earliest_alignment(&buses), expected, "{schedule}");
        }
    }

    #[test]
    fn zero_bus_is_rejected() {
        assert!(parse_schedule("7,0,x").is_err());
        assert!(Solver::parse("939\n").is_err());
    }
}
