use crate::utils::text::blocks;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{HashSet, VecDeque};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 22, tags = ["2020", "game"])]
pub struct Solver;

type Deck = VecDeque<u32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    One,
    Two,
}

fn parse_deck(lines: &[&str], header: &str) -> Result<Deck, ParseError> {
    match lines.split_first() {
        Some((first, cards)) if *first == header => cards
            .iter()
            .map(|c| {
                c.parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("bad card {c:?}")))
            })
            .collect(),
        _ => Err(ParseError::InvalidFormat(format!("expected deck starting with {header:?}"))),
    }
}

fn score(deck: &Deck) -> u64 {
    deck.iter()
        .rev()
        .zip(1u64..)
        .map(|(&card, weight)| card as u64 * weight)
        .sum()
}

/// Plain Combat: higher card wins the round
pub fn combat(mut one: Deck, mut two: Deck) -> (Player, Deck) {
    while let (Some(&a), Some(&b)) = (one.front(), two.front()) {
        one.pop_front();
        two.pop_front();
        if a > b {
            one.extend([a, b]);
        } else {
            two.extend([b, a]);
        }
    }
    if two.is_empty() { (Player::One, one) } else { (Player::Two, two) }
}

/// Recursive Combat; a repeated pair of decks within one game goes to player one
pub fn recursive_combat(mut one: Deck, mut two: Deck) -> (Player, Deck) {
    let mut seen: HashSet<(Deck, Deck)> = HashSet::new();
    while !one.is_empty() && !two.is_empty() {
        if !seen.insert((one.clone(), two.clone())) {
            return (Player::One, one);
        }
        let (Some(a), Some(b)) = (one.pop_front(), two.pop_front()) else {
            break;
        };
        let winner = if one.len() >= a as usize && two.len() >= b as usize {
            let sub_one = one.iter().take(a as usize).copied().collect();
            let sub_two = two.iter().take(b as usize).copied().collect();
            recursive_combat(sub_one, sub_two).0
        } else if a > b {
            Player::One
        } else {
            Player::Two
        };
        match winner {
            Player::One => one.extend([a, b]),
            Player::Two => two.extend([b, a]),
        }
    }
    if two.is_empty() { (Player::One, one) } else { (Player::Two, two) }
}

impl AocParser for Solver {
    type SharedData<'a> = (Deck, Deck);

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let [one, two] = <[Vec<&str>; 2]>::try_from(blocks(input))
            .map_err(|b| ParseError::InvalidFormat(format!("expected 2 decks, got {}", b.len())))?;
        Ok((parse_deck(&one, "Player 1:")?, parse_deck(&two, "Player 2:")?))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (_, deck) = combat(shared.0.clone(), shared.1.clone());
        Ok(score(&deck).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (_, deck) = recursive_combat(shared.0.clone(), shared.1.clone());
        Ok(score(&deck).to_string())
    }
}
