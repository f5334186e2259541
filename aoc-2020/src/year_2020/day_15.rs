use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 15, tags = ["2020", "slow"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<u32>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let numbers = input
            .trim()
            .split(',')
            .map(|n| {
                n.trim()
                    .parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("bad starting number {n:?}")))
            })
            .collect::<Result<Vec<u32>, _>>()?;
        if numbers.is_empty() {
            return Err(ParseError::MissingData("starting numbers".into()));
        }
        Ok(numbers)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        spoken_at(shared, 2020).map(|n| n.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        spoken_at(shared, 30_000_000).map(|n| n.to_string())
    }
}

/// Number spoken on `turn` (1-based) of the memory game
///
/// `last_seen[n]` holds the turn `n` was last spoken before the current one,
/// 0 meaning never. No number can exceed the turn count, so a flat Vec suffices.
pub fn spoken_at(starting: &[u32], turn: u32) -> Result<u32, SolveError> {
    if turn == 0 {
        return Err(SolveError::SolveFailed(anyhow!("turns are numbered from 1").into()));
    }
    if let Some(&n) = starting.get(turn as usize - 1) {
        return Ok(n);
    }
    let size = (turn as usize).max(starting.iter().max().map_or(0, |&m| m as usize + 1));
    let mut last_seen = vec![0u32; size];
    let (&first_new, seed) = starting
        .split_last()
        .ok_or_else(|| SolveError::SolveFailed(anyhow!("no starting numbers").into()))?;
    for (i, &n) in seed.iter().enumerate() {
        last_seen[n as usize] = i as u32 + 1;
    }

    let mut current = first_new;
    for t in starting.len() as u32..turn {
        let previous = std::mem::replace(&mut last_seen[current as usize], t);
        current = if previous == 0 { 0 } else { t - previous };
    }
    Ok(current)
}
