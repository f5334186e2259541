use crate::utils::CharGrid;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 11, tags = ["2020", "grid"])]
pub struct Solver;

const FLOOR: u8 = b'.';
const EMPTY: u8 = b'L';
const OCCUPIED: u8 = b'#';

const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Look at the eight adjacent cells, leave at four occupied
    Adjacent,
    /// Look at the first seat in each direction, leave at five occupied
    LineOfSight,
}

impl Rule {
    fn tolerance(self) -> usize {
        match self {
            Rule::Adjacent => 4,
            Rule::LineOfSight => 5,
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = CharGrid;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = CharGrid::parse(input)?;
        for y in 0..grid.height() {
            if let Some(&bad) = grid
                .row(y)
                .iter()
                .find(|&&c| !matches!(c, FLOOR | EMPTY | OCCUPIED))
            {
                return Err(ParseError::InvalidFormat(format!(
                    "(line {}) unexpected cell {:?}",
                    y + 1,
                    bad as char
                )));
            }
        }
        Ok(grid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(settle(shared, Rule::Adjacent).count(OCCUPIED).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(settle(shared, Rule::LineOfSight).count(OCCUPIED).to_string())
    }
}

/// Seats each seat watches under `rule`, as `(x, y)`
fn watched_seats(grid: &CharGrid, rule: Rule) -> Vec<Vec<(usize, usize)>> {
    let mut out = Vec::with_capacity(grid.width() * grid.height());
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let mut seats = Vec::new();
            if grid.get(x, y) != Some(FLOOR) {
                for (dx, dy) in DIRECTIONS {
                    let (mut cx, mut cy) = (x, y);
                    while let (Some(nx), Some(ny)) =
                        (cx.checked_add_signed(dx), cy.checked_add_signed(dy))
                    {
                        match grid.get(nx, ny) {
                            None => break,
                            Some(FLOOR) if matches!(rule, Rule::LineOfSight) => (cx, cy) = (nx, ny),
                            Some(_) => {
                                seats.push((nx, ny));
                                break;
                            }
                        }
                    }
                }
            }
            out.push(seats);
        }
    }
    out
}

/// Apply one round of seating changes, returning whether anything changed
fn step(grid: &CharGrid, watched: &[Vec<(usize, usize)>], rule: Rule) -> (CharGrid, bool) {
    let mut next = grid.clone();
    let mut changed = false;
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let seats = &watched[y * grid.width() + x];
            let occupied = || {
                seats
                    .iter()
                    .filter(|&&(sx, sy)| grid.get(sx, sy) == Some(OCCUPIED))
                    .count()
            };
            let new = match grid.get(x, y) {
                Some(EMPTY) if occupied() == 0 => OCCUPIED,
                Some(OCCUPIED) if occupied() >= rule.tolerance() => EMPTY,
                _ => continue,
            };
            next.set(x, y, new);
            changed = true;
        }
    }
    (next, changed)
}

/// Run rounds until the seating stops changing
fn settle(grid: &CharGrid, rule: Rule) -> CharGrid {
    let watched = watched_seats(grid, rule);
    let mut current = grid.clone();
    loop {
        let (next, changed) = step(&current, &watched, rule);
        if !changed {
            return current;
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve;

    const EXAMPLE: &str = "\
L.LL.LL.LL
LLLLLLL.LL
L.L.L..L..
LLLL.LL.LL
L.LL.LL.LL
L.LLLLL.LL
..L.L.....
LLLLLLLLLL
L.LLLLLL.L
L.LLLLL.LL
";

    fn rounds(rule: Rule, n: usize) -> String {
        let mut grid = Solver::parse(EXAMPLE).unwrap();
        let watched = watched_seats(&grid, rule);
        for _ in 0..n {
            grid = step(&grid, &watched, rule).0;
        }
        grid.render()
    }

    #[test]
    fn example_part1() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "37");
    }

    #[test]
    fn example_part2() {
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "26");
    }

    #[test]
    fn first_round_fills_every_seat() {
        assert_eq!(rounds(Rule::Adjacent, 1), EXAMPLE.trim_end().replace('L', "#"));
    }

    #[test]
    fn second_round_adjacent() {
        let expected = "\
#.LL.L#.##
#LLLLLL.L#
L.L.L..L..
#LLL.LL.L#
#.LL.LL.LL
#.LLLL#.##
..L.L.....
#LLLLLLLL#
#.LLLLLL.L
#.#LLLL.##";
        assert_eq!(rounds(Rule::Adjacent, 2), expected);
    }

    #[test]
    fn second_round_line_of_sight() {
        let expected = "\
#.LL.LL.L#
#LLLLLL.LL
L.L.L..L..
LLLL.LL.LL
L.LL.LL.LL
L.LLLLL.LL
..L.L.....
LLLLLLLLL#
#.LLLLLL.L
#.LLLLL.L#";
        assert_eq!(rounds(Rule::LineOfSight, 2), expected);
    }

    #[test]
    fn line_of_sight_skips_floor() {
        let grid = Solver::parse(".......#.\n...#.....\n.#.......\n.........\n..#L....#\n....#....\n.........\n#........\n...#.....").unwrap();
        let watched = watched_seats(&grid, Rule::LineOfSight);
        let seats = &watched[4 * grid.width() + 3];
        let occupied = seats.iter().filter(|&&(x, y)| grid.get(x, y) == Some(OCCUPIED)).count();
        assert_eq!(occupied, 8);
    }

    #[test]
    fn unknown_cell_is_rejected() {
        assert!(Solver::parse("L.L\nLxL").is_err());
    }
}
