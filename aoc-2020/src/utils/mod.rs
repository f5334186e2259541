//! Helpers shared by the day modules

pub mod char_grid;
pub mod text;

pub use char_grid::CharGrid;

/// Parse `input` with `S` and solve a single part, panicking on any error
#[cfg(test)]
pub(crate) fn solve<S: aoc_solver::Solver>(input: &str, part: u8) -> String {
    let mut shared = S::parse(input).unwrap_or_else(|e| panic!("parse failed: {e}"));
    S::solve_part(&mut shared, part).unwrap_or_else(|e| panic!("part {part} failed: {e}"))
}
