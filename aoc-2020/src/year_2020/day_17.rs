use crate::utils::CharGrid;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use std::collections::{HashMap, HashSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 17, tags = ["2020", "grid"])]
pub struct Solver;

const CYCLES: usize = 6;

type Cube = [i32; 4];

impl AocParser for Solver {
    /// Active cubes of the initial slice, with z and w at zero
    type SharedData<'a> = Vec<Cube>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = CharGrid::parse(input)?;
        for y in 0..grid.height() {
            if let Some(x) = grid.row(y).iter().position(|&c| c != b'.' && c != b'#') {
                return Err(ParseError::InvalidFormat(format!(
                    "(line {}) unexpected cell at column {}",
                    y + 1,
                    x + 1
                )));
            }
        }
        Ok(grid
            .positions(b'#')
            .map(|(x, y)| [x as i32, y as i32, 0, 0])
            .collect())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(simulate(shared, 3, CYCLES).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(simulate(shared, 4, CYCLES).to_string())
    }
}

/// Offsets to every neighbour in the first `dims` dimensions
fn neighbour_offsets(dims: usize) -> Vec<Cube> {
    (0..4)
        .map(|axis| if axis < dims { -1..=1 } else { 0..=0 })
        .multi_cartesian_product()
        .filter(|d| d.iter().any(|&c| c != 0))
        .map(|d| [d[0], d[1], d[2], d[3]])
        .collect()
}

/// Number of active cubes after `cycles` rounds in `dims` dimensions
pub fn simulate(initial: &[Cube], dims: usize, cycles: usize) -> usize {
    let offsets = neighbour_offsets(dims);
    let mut active: HashSet<Cube> = initial.iter().copied().collect();

    for _ in 0..cycles {
        let mut counts: HashMap<Cube, u8> = HashMap::new();
        for cube in &active {
            for d in &offsets {
                let n = [cube[0] + d[0], cube[1] + d[1], cube[2] + d[2], cube[3] + d[3]];
                *counts.entry(n).or_default() += 1;
            }
        }
        active = counts
            .into_iter()
            .filter(|&(cube, n)| n == 3 || (n == 2 && active.contains(&cube)))
            .map(|(cube, _)| cube)
            .collect();
    }
    active.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve;

    const EXAMPLE: &str = ".#.\n..#\n###\n";

    #[test]
    fn example_part1() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "112");
    }

    #[test]
    fn example_part2() {
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "848");
    }

    #[test]
    fn first_cycle() {
        let initial = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(simulate(&initial, 3, 1), 11);
        assert_eq!(simulate(&initial, 4, 1), 29);
    }

    #[test]
    fn offsets_per_dimension() {
        assert_eq!(neighbour_offsets(3).len(), 26);
        assert_eq!(neighbour_offsets(4).len(), 80);
    }
}
