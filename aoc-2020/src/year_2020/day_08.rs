use crate::utils::text::parse_lines;
use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 8, tags = ["2020", "vm"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Acc(i64),
    Jmp(i64),
    Nop(i64),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// An instruction was about to run a second time
    Loop(i64),
    /// The instruction pointer moved just past the last instruction
    Terminated(i64),
    /// The instruction pointer jumped anywhere else outside the program
    OutOfBounds(i64),
}

fn parse_op(line: &str) -> anyhow::Result<Op> {
    let (name, arg) = line
        .split_once(' ')
        .ok_or_else(|| anyhow!("expected `op arg`"))?;
    let arg = arg.parse().with_context(|| format!("bad argument {arg:?}"))?;
    Ok(match name {
        "acc" => Op::Acc(arg),
        "jmp" => Op::Jmp(arg),
        "nop" => Op::Nop(arg),
        other => bail!("unknown operation {other:?}"),
    })
}

/// Run the program until it loops or leaves the instruction range
pub fn run(program: &[Op]) -> Outcome {
    let mut visited = vec![false; program.len()];
    let (mut pc, mut acc) = (0i64, 0i64);
    loop {
        if pc == program.len() as i64 {
            return Outcome::Terminated(acc);
        }
        let Some(idx) = usize::try_from(pc).ok().filter(|&i| i < program.len()) else {
            return Outcome::OutOfBounds(acc);
        };
        if std::mem::replace(&mut visited[idx], true) {
            return Outcome::Loop(acc);
        }
        match program[idx] {
            Op::Acc(n) => {
                acc += n;
                pc += 1;
            }
            Op::Jmp(n) => pc += n,
            Op::Nop(_) => pc += 1,
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Op>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, parse_op)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        match run(shared) {
            Outcome::Loop(acc) => Ok(acc.to_string()),
            other => Err(SolveError::SolveFailed(
                anyhow!("program did not loop: {other:?}").into(),
            )),
        }
    }
}

impl PartSolver<2> for Solver {
    /// Swaps one `jmp`/`nop` at a time in place, restoring it before the next try
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        for idx in 0..shared.len() {
            let original = shared[idx];
            shared[idx] = match original {
                Op::Jmp(n) => Op::Nop(n),
                Op::Nop(n) => Op::Jmp(n),
                Op::Acc(_) => continue,
            };
            let outcome = run(shared);
            shared[idx] = original;
            if let Outcome::Terminated(acc) = outcome {
                return Ok(acc.to_string());
            }
        }
        Err(SolveError::SolveFailed(
            anyhow!("no single jmp/nop swap terminates the program").into(),
        ))
    }
}
