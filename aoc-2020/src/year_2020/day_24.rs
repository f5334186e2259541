use crate::utils::text::parse_lines;
use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{HashMap, HashSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 24, tags = ["2020", "grid"])]
pub struct Solver;

const DAYS: usize = 100;

/// Axial hex coordinate `(q, r)`
type Hex = (i32, i32);

const NEIGHBOURS: [Hex; 6] = [(1, 0), (-1, 0), (1, -1), (0, -1), (0, 1), (-1, 1)];

/// Follow a run of `e`, `se`, `sw`, `w`, `nw`, `ne` steps from the reference tile
fn walk(line: &str) -> anyhow::Result<Hex> {
    let mut bytes = line.bytes();
    let (mut q, mut r) = (0, 0);
    while let Some(b) = bytes.next() {
        let (dq, dr) = match (b, b"ns".contains(&b).then(|| bytes.next()).flatten()) {
            (b'e', _) => (1, 0),
            (b'w', _) => (-1, 0),
            (b'n', Some(b'e')) => (1, -1),
            (b'n', Some(b'w')) => (0, -1),
            (b's', Some(b'e')) => (0, 1),
            (b's', Some(b'w')) => (-1, 1),
            _ => bail!("bad direction at {:?}", String::from_utf8_lossy(&[b])),
        };
        q += dq;
        r += dr;
    }
    Ok((q, r))
}

/// One day of the floor rule: black tiles with 0 or more than 2 black neighbours
/// turn white, white tiles with exactly 2 turn black
fn next_day(black: &HashSet<Hex>) -> HashSet<Hex> {
    let mut counts: HashMap<Hex, u8> = HashMap::new();
    for &(q, r) in black {
        for (dq, dr) in NEIGHBOURS {
            *counts.entry((q + dq, r + dr)).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .filter(|&(hex, n)| n == 2 || (n == 1 && black.contains(&hex)))
        .map(|(hex, _)| hex)
        .collect()
}

impl AocParser for Solver {
    /// Tiles left black after every path is flipped
    type SharedData<'a> = HashSet<Hex>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut black = HashSet::new();
        for hex in parse_lines(input, walk)? {
            if !black.insert(hex) {
                black.remove(&hex);
            }
        }
        Ok(black)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let floor = (0..DAYS).fold(shared.clone(), |black, _| next_day(&black));
        Ok(floor.len().to_string())
    }
}
