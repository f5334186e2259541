use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 23, tags = ["2020", "slow"])]
pub struct Solver;

pub const MOVES: usize = 100;
const MANY_CUPS: usize = 1_000_000;
const MANY_MOVES: usize = 10_000_000;

/// Circle of cups stored as successor links: `next[label]` is the cup after `label`
pub struct Circle {
    next: Vec<u32>,
    current: u32,
}

impl Circle {
    /// Circle of `labels` followed by `labels.len() + 1 ..= total`
    pub fn new(labels: &[u32], total: usize) -> Self {
        let order: Vec<u32> = labels
            .iter()
            .copied()
            .chain(labels.len() as u32 + 1..=total as u32)
            .collect();
        let mut next = vec![0u32; order.len() + 1];
        for (&a, &b) in order.iter().circular_tuple_windows() {
            next[a as usize] = b;
        }
        Self {
            next,
            current: order[0],
        }
    }

    fn max_label(&self) -> u32 {
        (self.next.len() - 1) as u32
    }

    pub fn play(&mut self, moves: usize) {
        let max = self.max_label();
        for _ in 0..moves {
            let a = self.next[self.current as usize];
            let b = self.next[a as usize];
            let c = self.next[b as usize];

            let mut dest = self.current;
            loop {
                dest = if dest == 1 { max } else { dest - 1 };
                if dest != a && dest != b && dest != c {
                    break;
                }
            }

            self.next[self.current as usize] = self.next[c as usize];
            self.next[c as usize] = self.next[dest as usize];
            self.next[dest as usize] = a;
            self.current = self.next[self.current as usize];
        }
    }

    /// Labels clockwise after cup 1
    pub fn after_one(&self) -> impl Iterator<Item = u32> + '_ {
        let mut cup = 1;
        std::iter::from_fn(move || {
            cup = self.next[cup as usize];
            (cup != 1).then_some(cup)
        })
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<u32>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let labels: Vec<u32> = input
            .trim()
            .chars()
            .map(|c| {
                c.to_digit(10)
                    .ok_or_else(|| ParseError::InvalidFormat(format!("bad cup label {c:?}")))
            })
            .collect::<Result<_, _>>()?;
        let mut sorted = labels.clone();
        sorted.sort_unstable();
        if sorted.len() < 4 || sorted.iter().zip(1..).any(|(&l, expected)| l != expected) {
            return Err(ParseError::InvalidFormat(
                "need at least 4 cups labelled 1..=n, each exactly once".into(),
            ));
        }
        Ok(labels)
    }
}

/// Labels after cup 1 once `moves` moves are played on just the given cups
pub fn labels_after(labels: &[u32], moves: usize) -> String {
    let mut circle = Circle::new(labels, labels.len());
    circle.play(moves);
    circle.after_one().join("")
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(labels_after(shared, MOVES))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut circle = Circle::new(shared, MANY_CUPS);
        circle.play(MANY_MOVES);
        let (a, b) = circle
            .after_one()
            .next_tuple()
            .ok_or_else(|| SolveError::SolveFailed(anyhow!("fewer than three cups").into()))?;
        Ok((a as u64 * b as u64).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve;

    const EXAMPLE: &str = "389125467\n";

    #[test]
    fn ten_moves() {
        let labels = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(labels_after(&labels, 10), "92658374");
    }

    #[test]
    fn example_part1() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "67384529");
    }

    #[test]
    fn example_part2() {
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "149245887792");
    }

    #[test]
    fn extended_circle_links_back_to_start() {
        let circle = Circle::new(&[3, 1, 2], 5);
        assert_eq!(circle.after_one().collect::<Vec<_>>(), vec![2, 4, 5, 3]);
    }

    #[test]
    fn labels_must_be_a_permutation() {
        assert!(Solver::parse("3891").is_err());
        assert!(Solver::parse("1224").is_err());
        assert!(Solver::parse("").is_err());
    }
}
