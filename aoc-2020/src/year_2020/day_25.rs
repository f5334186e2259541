use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2020, day = 25, tags = ["2020", "math"])]
pub struct Solver;

const MODULUS: u64 = 20201227;
const SUBJECT: u64 = 7;

/// `subject ^ loop_size mod 20201227`
pub fn transform(subject: u64, loop_size: u64) -> u64 {
    let (mut base, mut exp, mut acc) = (subject % MODULUS, loop_size, 1);
    while exp > 0 {
        if exp & 1 == 1 {
            acc = acc * base % MODULUS;
        }
        base = base * base % MODULUS;
        exp >>= 1;
    }
    acc
}

/// Smallest loop size turning subject 7 into `public_key`, if one exists
pub fn loop_size(public_key: u64) -> Option<u64> {
    let mut value = 1;
    for n in 0..MODULUS {
        if value == public_key {
            return Some(n);
        }
        value = value * SUBJECT % MODULUS;
    }
    None
}

impl AocParser for Solver {
    /// Card and door public keys
    type SharedData<'a> = (u64, u64);

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let keys = input
            .split_whitespace()
            .map(|k| {
                k.parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("bad public key {k:?}")))
            })
            .collect::<Result<Vec<u64>, _>>()?;
        match keys[..] {
            [card, door] => Ok((card, door)),
            _ => Err(ParseError::InvalidFormat(format!(
                "expected 2 public keys, got {}",
                keys.len()
            ))),
        }
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (card, door) = *shared;
        let card_loop = loop_size(card).ok_or_else(|| {
            SolveError::SolveFailed(anyhow!("no loop size produces key {card}").into())
        })?;
        Ok(transform(door, card_loop).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve;
    use aoc_solver::SolverExt;
    use proptest::prelude::*;

    const EXAMPLE: &str = "5764801\n17807724\n";

    #[test]
    fn example_part1() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "14897079");
    }

    #[test]
    fn loop_sizes() {
        assert_eq!(loop_size(5764801), Some(8));
        assert_eq!(loop_size(17807724), Some(11));
        assert_eq!(transform(5764801, 11), transform(17807724, 8));
    }

    #[test]
    fn only_one_part() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert!(matches!(
            Solver::solve_part_checked_range(&mut shared, 2),
            Err(SolveError::PartOutOfRange(2))
        ));
    }

    #[test]
    fn needs_two_keys() {
        assert!(Solver::parse("5764801").is_err());
    }

    proptest! {
        #[test]
        fn handshake_keys_agree(card_loop in 1u64..5_000, door_loop in 1u64..5_000) {
            let card = transform(SUBJECT, card_loop);
            let door = transform(SUBJECT, door_loop);
            prop_assert_eq!(transform(door, card_loop), transform(card, door_loop));

            let found = loop_size(card).unwrap();
            prop_assert!(found <= card_loop);
            prop_assert_eq!(transform(SUBJECT, found), card);
        }
    }
}
