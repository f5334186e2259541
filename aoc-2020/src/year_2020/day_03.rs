use crate::utils::CharGrid;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 3, tags = ["2020", "grid"])]
pub struct Solver;

const SLOPES: [(usize, usize); 5] = [(1, 1), (3, 1), (5, 1), (7, 1), (1, 2)];

impl AocParser for Solver {
    type SharedData<'a> = CharGrid;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        CharGrid::parse(input)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(trees_on_slope(shared, 3, 1).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let product: u64 = SLOPES
            .iter()
            .map(|&(right, down)| trees_on_slope(shared, right, down) as u64)
            .product();
        Ok(product.to_string())
    }
}

/// Trees hit going `right`, `down` from the top left; the map repeats to the right
fn trees_on_slope(map: &CharGrid, right: usize, down: usize) -> usize {
    (0..map.height())
        .step_by(down)
        .enumerate()
        .filter(|&(step, y)| map.get((step * right) % map.width(), y) == Some(b'#'))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve;

    const EXAMPLE: &str = "\
..##.......
#...#...#..
.#....#..#.
..#.#...#.#
.#...##..#.
..#.##.....
.#.#.#....#
.#........#
#.##...#...
#...##....#
.#..#...#.#
";

    #[test]
    fn example_part1() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "7");
    }

    #[test]
    fn example_part2() {
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "336");
    }

    #[test]
    fn each_slope() {
        let map = CharGrid::parse(EXAMPLE).unwrap();
        let counts: Vec<_> = SLOPES
            .iter()
            .map(|&(r, d)| trees_on_slope(&map, r, d))
            .collect();
        assert_eq!(counts, vec![2, 7, 3, 4, 2]);
    }
}
