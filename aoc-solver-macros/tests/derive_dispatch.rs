use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};
use std::fmt;

/// Boot code program: part 1 finds the loop, part 2 reports how far part 1 got
#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct BootCode;

struct Program<'a> {
    ops: Vec<(&'a str, i32)>,
    visited: usize,
}

#[derive(Debug)]
struct NoLoop;

impl fmt::Display for NoLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "program terminated without looping")
    }
}

impl std::error::Error for NoLoop {}

impl AocParser for BootCode {
    type SharedData<'a> = Program<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let ops = input
            .lines()
            .map(|line| {
                let (op, arg) = line
                    .split_once(' ')
                    .ok_or_else(|| ParseError::MissingData(line.to_string()))?;
                let arg = arg
                    .parse()
                    .map_err(|_| ParseError::InvalidFormat(arg.to_string()))?;
                Ok((op, arg))
            })
            .collect::<Result<_, _>>()?;
        Ok(Program { ops, visited: 0 })
    }
}

impl PartSolver<1> for BootCode {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut seen = vec![false; shared.ops.len()];
        let (mut pc, mut acc) = (0i32, 0i32);
        while let Some(&(op, arg)) = shared.ops.get(pc as usize) {
            if std::mem::replace(&mut seen[pc as usize], true) {
                shared.visited = seen.iter().filter(|s| **s).count();
                return Ok(acc.to_string());
            }
            match op {
                "acc" => acc += arg,
                "jmp" => {
                    pc += arg;
                    continue;
                }
                _ => {}
            }
            pc += 1;
        }
        Err(SolveError::SolveFailed(Box::new(NoLoop)))
    }
}

impl PartSolver<2> for BootCode {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.visited.to_string())
    }
}

const LOOPING: &str = "nop +0\nacc +1\njmp +4\nacc +3\njmp -3\nacc -99\nacc +1\njmp -4\nacc +6";

#[test]
fn parts_constant_follows_attribute() {
    assert_eq!(BootCode::PARTS, 2);
}

#[test]
fn shared_data_may_borrow_input() {
    let program = BootCode::parse(LOOPING).unwrap();
    assert_eq!(program.ops[0], ("nop", 0));
    assert_eq!(program.ops.len(), 9);
}

#[test]
fn parts_share_mutable_state() {
    let mut program = BootCode::parse(LOOPING).unwrap();
    assert_eq!(BootCode::solve_part(&mut program, 1).unwrap(), "5");
    assert_eq!(BootCode::solve_part(&mut program, 2).unwrap(), "7");
}

#[test]
fn solve_errors_propagate_with_source() {
    let mut program = BootCode::parse("acc +1\nnop +0").unwrap();
    let err = BootCode::solve_part(&mut program, 1).unwrap_err();
    assert!(matches!(err, SolveError::SolveFailed(_)));
    assert!(err.to_string().contains("terminated without looping"));
}

#[test]
fn undeclared_parts_are_not_implemented() {
    let mut program = BootCode::parse(LOOPING).unwrap();
    assert!(matches!(
        BootCode::solve_part(&mut program, 0),
        Err(SolveError::PartNotImplemented(0))
    ));
    assert!(matches!(
        BootCode::solve_part(&mut program, 3),
        Err(SolveError::PartNotImplemented(3))
    ));
}
