use crate::utils::text::parse_lines;
use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 12, tags = ["2020"])]
pub struct Solver;

/// Navigation instruction; turns are stored as clockwise quarter turns (0-3)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    North(i64),
    South(i64),
    East(i64),
    West(i64),
    Turn(u8),
    Forward(i64),
}

/// East/north position or offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Vec2 {
    east: i64,
    north: i64,
}

impl Vec2 {
    const fn new(east: i64, north: i64) -> Self {
        Self { east, north }
    }

    fn rotate_clockwise(self, quarters: u8) -> Self {
        (0..quarters).fold(self, |v, _| Self::new(v.north, -v.east))
    }

    fn manhattan(self) -> i64 {
        self.east.abs() + self.north.abs()
    }

    fn moved(self, action: Action) -> Self {
        match action {
            Action::North(n) => Self::new(self.east, self.north + n),
            Action::South(n) => Self::new(self.east, self.north - n),
            Action::East(n) => Self::new(self.east + n, self.north),
            Action::West(n) => Self::new(self.east - n, self.north),
            Action::Turn(_) | Action::Forward(_) => self,
        }
    }
}

fn parse_action(line: &str) -> anyhow::Result<Action> {
    let (kind, value) = line.split_at_checked(1).ok_or_else(|| anyhow!("empty instruction"))?;
    let value: i64 = value.parse().with_context(|| format!("bad value in {line:?}"))?;
    let quarters = |degrees: i64| -> anyhow::Result<u8> {
        if degrees % 90 != 0 {
            bail!("turn of {degrees} degrees is not a multiple of 90");
        }
        Ok((degrees / 90).rem_euclid(4) as u8)
    };
    Ok(match kind {
        "N" => Action::North(value),
        "S" => Action::South(value),
        "E" => Action::East(value),
        "W" => Action::West(value),
        "R" => Action::Turn(quarters(value)?),
        "L" => Action::Turn(quarters(-value)?),
        "F" => Action::Forward(value),
        other => bail!("unknown action {other:?}"),
    })
}

/// Follow the actions with `heading` as the vector `F` moves along.
/// When `steer_heading` is set, N/S/E/W move the heading instead of the ship.
pub fn navigate(actions: &[Action], mut heading: Vec2, steer_heading: bool) -> Vec2 {
    let mut ship = Vec2::default();
    for &action in actions {
        match action {
            Action::Turn(q) => heading = heading.rotate_clockwise(q),
            Action::Forward(n) => {
                ship = Vec2::new(ship.east + heading.east * n, ship.north + heading.north * n)
            }
            _ if steer_heading => heading = heading.moved(action),
            _ => ship = ship.moved(action),
        }
    }
    ship
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Action>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, parse_action)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(navigate(shared, Vec2::new(1, 0), false).manhattan().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(navigate(shared, Vec2::new(10, 1), true).manhattan().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve;

    const EXAMPLE: &str = "F10\nN3\nF7\nR90\nF11\n";

    #[test]
    fn example_part1() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "25");
    }

    #[test]
    fn example_part2() {
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "286");
    }

    #[test]
    fn waypoint_trace() {
        let actions = Solver::parse(EXAMPLE).unwrap();
        let positions: Vec<_> = (1..=actions.len())
            .map(|n| navigate(&actions[..n], Vec2::new(10, 1), true))
            .collect();
        assert_eq!(
            positions,
            vec![
                Vec2::new(100, 10),
                Vec2::new(100, 10),
                Vec2::new(170, 38),
                Vec2::new(170, 38),
                Vec2::new(214, -72),
            ]
        );
        assert_eq!(Vec2::new(10, 4).rotate_clockwise(1), Vec2::new(4, -10));
    }

    #[test]
    fn turns_normalise() {
        assert_eq!(parse_action("L90").unwrap(), Action::Turn(3));
        assert_eq!(parse_action("R270").unwrap(), Action::Turn(3));
        assert_eq!(parse_action("L360").unwrap(), Action::Turn(0));
        assert!(parse_action("R45").is_err());
        assert!(parse_action("X5").is_err());
    }
}
