use crate::utils::text::parse_lines;
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 10, tags = ["2020", "dp"])]
pub struct Solver;

impl AocParser for Solver {
    /// Full joltage chain: the outlet (0), every adapter in order, then the device
    type SharedData<'a> = Vec<u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut chain = parse_lines(input, |line| Ok(line.parse::<u64>()?))?;
        chain.sort_unstable();
        let device = chain.last().map_or(3, |max| max + 3);
        chain.insert(0, 0);
        chain.push(device);
        Ok(chain)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut counts = [0u64; 4];
        for w in shared.windows(2) {
            let diff = w[1] - w[0];
            if !(1..=3).contains(&diff) {
                return Err(SolveError::SolveFailed(
                    anyhow!("gap of {diff} jolts between {} and {}", w[0], w[1]).into(),
                ));
            }
            counts[diff as usize] += 1;
        }
        Ok((counts[1] * counts[3]).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // ways[i]: arrangements reaching chain[i]
        let mut ways = vec![0u64; shared.len()];
        ways[0] = 1;
        for i in 1..shared.len() {
            ways[i] = (i.saturating_sub(3)..i)
                .filter(|&j| shared[i] - shared[j] <= 3)
                .map(|j| ways[j])
                .sum();
        }
        Ok(ways.last().copied().unwrap_or(0).to_string())
    }
}
