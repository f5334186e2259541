use crate::utils::text::parse_lines;
use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::iter::Peekable;
use std::slice::Iter;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 18, tags = ["2020", "parser"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Num(u64),
    Add,
    Mul,
    Open,
    Close,
}

fn tokenize(line: &str) -> anyhow::Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut bytes = line.bytes().peekable();
    while let Some(b) = bytes.next() {
        tokens.push(match b {
            b' ' => continue,
            b'+' => Token::Add,
            b'*' => Token::Mul,
            b'(' => Token::Open,
            b')' => Token::Close,
            b'0'..=b'9' => {
                let mut n = u64::from(b - b'0');
                while let Some(d) = bytes.next_if(u8::is_ascii_digit) {
                    n = n * 10 + u64::from(d - b'0');
                }
                Token::Num(n)
            }
            other => bail!("unexpected character {:?}", other as char),
        });
    }
    Ok(tokens)
}

/// Binding strength of each operator; higher binds tighter
#[derive(Debug, Clone, Copy)]
pub struct Precedence {
    add: u8,
    mul: u8,
}

/// `+` and `*` evaluated strictly left to right
pub const FLAT: Precedence = Precedence { add: 1, mul: 1 };
/// `+` evaluated before `*`
pub const ADDITION_FIRST: Precedence = Precedence { add: 2, mul: 1 };

struct Evaluator<'t> {
    tokens: Peekable<Iter<'t, Token>>,
    precedence: Precedence,
}

impl Evaluator<'_> {
    fn primary(&mut self) -> anyhow::Result<u64> {
        match self.tokens.next() {
            Some(&Token::Num(n)) => Ok(n),
            Some(Token::Open) => {
                let value = self.expression(0)?;
                match self.tokens.next() {
                    Some(Token::Close) => Ok(value),
                    other => Err(anyhow!("expected ')', found {other:?}")),
                }
            }
            other => Err(anyhow!("expected a number or '(', found {other:?}")),
        }
    }

    /// Precedence climbing; operators of equal strength associate to the left
    fn expression(&mut self, min: u8) -> anyhow::Result<u64> {
        let mut lhs = self.primary()?;
        loop {
            let (op, strength) = match self.tokens.peek() {
                Some(Token::Add) => (Token::Add, self.precedence.add),
                Some(Token::Mul) => (Token::Mul, self.precedence.mul),
                _ => return Ok(lhs),
            };
            if strength < min {
                return Ok(lhs);
            }
            self.tokens.next();
            let rhs = self.expression(strength + 1)?;
            lhs = match op {
                Token::Add => lhs + rhs,
                _ => lhs * rhs,
            };
        }
    }
}

/// Evaluate one tokenized expression, failing on trailing tokens
pub fn evaluate(tokens: &[Token], precedence: Precedence) -> anyhow::Result<u64> {
    let mut evaluator = Evaluator {
        tokens: tokens.iter().peekable(),
        precedence,
    };
    let value = evaluator.expression(0)?;
    match evaluator.tokens.next() {
        None => Ok(value),
        Some(t) => Err(anyhow!("unexpected trailing {t:?}")),
    }
}

fn sum_all(expressions: &[Vec<Token>], precedence: Precedence) -> Result<String, SolveError> {
    expressions
        .iter()
        .enumerate()
        .map(|(i, tokens)| {
            evaluate(tokens, precedence).map_err(|e| {
                SolveError::SolveFailed(e.context(format!("expression {}", i + 1)).into())
            })
        })
        .sum::<Result<u64, _>>()
        .map(|total| total.to_string())
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<Token>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, tokenize)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        sum_all(shared, FLAT)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        sum_all(shared, ADDITION_FIRST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLES: [&str; 6] = [
        "1 + 2 * 3 + 4 * 5 + 6",
        "1 + (2 * 3) + (4 * (5 + 6))",
        "2 * 3 + (4 * 5)",
        "5 + (8 * 3 + 9 + 3 * 4 * 3)",
        "5 * 9 * (7 * 3 * 3 + 9 * 3 + (8 + 6 * 4))",
        "((2 + 4 * 9) * (6 + 9 * 8 + 6) + 6) + 2 + 4 * 2",
    ];

    fn eval(expr: &str, precedence: Precedence) -> u64 {
        evaluate(&tokenize(expr).unwrap(), precedence).unwrap()
    }

    #[test]
    fn left_to_right() {
        let values: Vec<_> = EXAMPLES.iter().map(|e| eval(e, FLAT)).collect();
        assert_eq!(values, vec![71, 51, 26, 437, 12240, 13632]);
    }

    #[test]
    fn addition_first() {
        let values: Vec<_> = EXAMPLES.iter().map(|e| eval(e, ADDITION_FIRST)).collect();
        assert_eq!(values, vec![231, 51, 46, 1445, 669060, 23340]);
    }

    #[test]
    fn parts_sum_every_line() {
        let input = EXAMPLES.join("\n");
        let mut shared = Solver::parse(&input).unwrap();
        assert_eq!(
            <Solver as PartSolver<1>>::solve(&mut shared).unwrap(),
            (71 + 51 + 26 + 437 + 12240 + 13632).to_string()
        );
        assert_eq!(
            <Solver as PartSolver<2>>::solve(&mut shared).unwrap(),
            (231 + 51 + 46 + 1445 + 669060 + 23340).to_string()
        );
    }

    #[test]
    fn multi_digit_numbers() {
        assert_eq!(eval("12 * (3 + 10)", FLAT), 156);
    }

    #[test]
    fn malformed_expressions() {
        assert!(tokenize("1 - 2").is_err());
        assert!(evaluate(&tokenize("(1 + 2").unwrap(), FLAT).is_err());
        assert!(evaluate(&tokenize("1 + 2)").unwrap(), FLAT).is_err());
        assert!(evaluate(&tokenize("1 +").unwrap(), FLAT).is_err());
    }
}
