use crate::utils::text::parse_lines;
use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 14, tags = ["2020", "bits"])]
pub struct Solver;

const WIDTH: usize = 36;

/// 36-bit mask split into the bits forced to 1 and the `X` bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mask {
    ones: u64,
    floating: u64,
}

impl Mask {
    fn apply_to_value(self, value: u64) -> u64 {
        value & self.floating | self.ones
    }

    /// Every address produced by forcing ones and enumerating the floating bits
    fn addresses(self, address: u64) -> impl Iterator<Item = u64> {
        let base = (address | self.ones) & !self.floating;
        let floating = self.floating;
        // Walk all subsets of `floating`, ending with the empty set
        let mut subset = Some(floating);
        std::iter::from_fn(move || {
            let current = subset?;
            subset = (current != 0).then(|| (current - 1) & floating);
            Some(base | current)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    SetMask(Mask),
    Write { address: u64, value: u64 },
}

fn parse_instruction(line: &str) -> anyhow::Result<Instruction> {
    let (target, value) = line
        .split_once(" = ")
        .ok_or_else(|| anyhow!("expected `target = value`"))?;
    if target == "mask" {
        if value.len() != WIDTH {
            bail!("mask must have {WIDTH} bits");
        }
        let mut mask = Mask::default();
        for b in value.bytes() {
            mask.ones <<= 1;
            mask.floating <<= 1;
            match b {
                b'1' => mask.ones |= 1,
                b'X' => mask.floating |= 1,
                b'0' => {}
                other => bail!("unexpected mask bit {:?}", other as char),
            }
        }
        return Ok(Instruction::SetMask(mask));
    }
    let address = target
        .strip_prefix("mem[")
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| anyhow!("unknown target {target:?}"))?
        .parse()
        .context("memory address")?;
    let value = value.parse().context("memory value")?;
    Ok(Instruction::Write { address, value })
}

fn run(
    program: &[Instruction],
    mut write: impl FnMut(&mut HashMap<u64, u64>, Mask, u64, u64),
) -> u64 {
    let mut memory = HashMap::new();
    let mut mask = Mask::default();
    for &instruction in program {
        match instruction {
            Instruction::SetMask(m) => mask = m,
            Instruction::Write { address, value } => write(&mut memory, mask, address, value),
        }
    }
    memory.values().sum()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instruction>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, parse_instruction)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total = run(shared, |memory, mask, address, value| {
            memory.insert(address, mask.apply_to_value(value));
        });
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total = run(shared, |memory, mask, address, value| {
            for addr in mask.addresses(address) {
                memory.insert(addr, value);
            }
        });
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve;

    const EXAMPLE_1: &str = "\
mask = XXXXXXXXXXXXXXXXXXXXXXXXXXXXX1XXXX0X
mem[8] = 11
mem[7] = 101
mem[8] = 0
";

    const EXAMPLE_2: &str = "\
mask = 000000000000000000000000000000X1001X
mem[42] = 100
mask = 00000000000000000000000000000000X0XX
mem[26] = 1
";

    #[test]
    fn example_part1() {
        assert_eq!(solve::<Solver>(EXAMPLE_1, 1), "165");
    }

    #[test]
    fn example_part2() {
        assert_eq!(solve::<Solver>(EXAMPLE_2, 2), "208");
    }

    #[test]
    fn value_mask() {
        let first = parse_instruction(EXAMPLE_1.lines().next().unwrap()).unwrap();
        let Instruction::SetMask(mask) = first else {
            panic!("expected a mask");
        };
        assert_eq!(mask.apply_to_value(11), 73);
        assert_eq!(mask.apply_to_value(101), 101);
        assert_eq!(mask.apply_to_value(0), 64);
    }

    #[test]
    fn floating_addresses() {
        let first = parse_instruction(EXAMPLE_2.lines().next().unwrap()).unwrap();
        let Instruction::SetMask(mask) = first else {
            panic!("expected a mask");
        };
        let mut addresses: Vec<_> = mask.addresses(42).collect();
        addresses.sort_unstable();
        assert_eq!(addresses, vec![26, 27, 58, 59]);
    }

    #[test]
    fn bad_mask_is_rejected() {
        assert!(parse_instruction("mask = 1X0").is_err());
        assert!(parse_instruction("mem[x] = 3").is_err());
    }
}
