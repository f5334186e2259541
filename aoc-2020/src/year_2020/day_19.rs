use crate::utils::text::blocks;
use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;
use std::collections::HashMap;
use tracing::trace;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 19, tags = ["2020", "regex"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Literal(char),
    /// Alternatives, each a sequence of rule ids
    Any(Vec<Vec<u32>>),
}

#[derive(Debug)]
pub struct Puzzle<'a> {
    rules: HashMap<u32, Rule>,
    messages: Vec<&'a str>,
}

fn parse_rule(line: &str) -> anyhow::Result<(u32, Rule)> {
    let (id, body) = line
        .split_once(": ")
        .ok_or_else(|| anyhow!("expected `id: body`"))?;
    let id = id.parse().context("rule id")?;
    let body = body.trim();
    if let Some(quoted) = body.strip_prefix('"').and_then(|b| b.strip_suffix('"')) {
        let mut chars = quoted.chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => Ok((id, Rule::Literal(c))),
            _ => Err(anyhow!("literal rule must be a single character")),
        };
    }
    let alternatives = body
        .split('|')
        .map(|seq| {
            seq.split_whitespace()
                .map(|r| r.parse().with_context(|| format!("rule reference {r:?}")))
                .collect::<anyhow::Result<Vec<u32>>>()
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    if alternatives.iter().any(Vec::is_empty) {
        bail!("empty alternative");
    }
    Ok((id, Rule::Any(alternatives)))
}

/// Compiles rules into regex fragments, memoising each rule id
struct Compiler<'r> {
    rules: &'r HashMap<u32, Rule>,
    patterns: HashMap<u32, String>,
    min_lengths: HashMap<u32, usize>,
}

impl<'r> Compiler<'r> {
    fn new(rules: &'r HashMap<u32, Rule>) -> Self {
        Self {
            rules,
            patterns: HashMap::new(),
            min_lengths: HashMap::new(),
        }
    }

    fn rule(&self, id: u32) -> anyhow::Result<&'r Rule> {
        self.rules.get(&id).ok_or_else(|| anyhow!("rule {id} is not defined"))
    }

    /// Regex fragment matching rule `id`; rules must not refer to themselves
    fn pattern(&mut self, id: u32) -> anyhow::Result<String> {
        if let Some(p) = self.patterns.get(&id) {
            return Ok(p.clone());
        }
        let pattern = match self.rule(id)? {
            Rule::Literal(c) => regex::escape(&c.to_string()),
            Rule::Any(alternatives) => {
                let mut parts = Vec::with_capacity(alternatives.len());
                for seq in alternatives {
                    let mut part = String::new();
                    for &r in seq {
                        part.push_str(&self.pattern(r)?);
                    }
                    parts.push(part);
                }
                format!("(?:{})", parts.join("|"))
            }
        };
        self.patterns.insert(id, pattern.clone());
        Ok(pattern)
    }

    /// Length of the shortest message rule `id` matches
    fn min_length(&mut self, id: u32) -> anyhow::Result<usize> {
        if let Some(&n) = self.min_lengths.get(&id) {
            return Ok(n);
        }
        let n = match self.rule(id)? {
            Rule::Literal(_) => 1,
            Rule::Any(alternatives) => {
                let mut best = usize::MAX;
                for seq in alternatives {
                    let mut len = 0;
                    for &r in seq {
                        len += self.min_length(r)?;
                    }
                    best = best.min(len);
                }
                best
            }
        };
        self.min_lengths.insert(id, n);
        Ok(n)
    }
}

fn anchored(pattern: &str) -> anyhow::Result<Regex> {
    Regex::new(&format!("^{pattern}$")).context("compiling rule regex")
}

fn count_matching(puzzle: &Puzzle<'_>) -> anyhow::Result<usize> {
    let re = anchored(&Compiler::new(&puzzle.rules).pattern(0)?)?;
    Ok(puzzle.messages.iter().filter(|m| re.is_match(m)).count())
}

/// Rule 0 is `8 11` with `8: 42 | 42 8` and `11: 42 31 | 42 11 31`,
/// i.e. `42{k+n} 31{n}` for `k, n >= 1`. Each `n` is checked with its own regex.
fn count_matching_with_loops(puzzle: &Puzzle<'_>) -> anyhow::Result<usize> {
    if puzzle.rules.get(&0) != Some(&Rule::Any(vec![vec![8, 11]])) {
        bail!("looping rules expect rule 0 to be `8 11`");
    }
    let mut compiler = Compiler::new(&puzzle.rules);
    let (r42, r31) = (compiler.pattern(42)?, compiler.pattern(31)?);
    let (len42, len31) = (compiler.min_length(42)?, compiler.min_length(31)?);
    let longest = puzzle.messages.iter().map(|m| m.len()).max().unwrap_or(0);

    let mut regexes = Vec::new();
    for n in 1.. {
        if len42 * (n + 1) + len31 * n > longest {
            break;
        }
        regexes.push(anchored(&format!("(?:{r42})+(?:{r42}){{{n}}}(?:{r31}){{{n}}}"))?);
    }
    trace!(depth = regexes.len(), "compiled looping rule patterns");

    Ok(puzzle
        .messages
        .iter()
        .filter(|m| regexes.iter().any(|re| re.is_match(m)))
        .count())
}

impl AocParser for Solver {
    type SharedData<'a> = Puzzle<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let [rules, messages] = <[Vec<&str>; 2]>::try_from(blocks(input))
            .map_err(|b| {
                ParseError::InvalidFormat(format!("expected 2 sections, got {}", b.len()))
            })?;
        let rules = rules
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                parse_rule(line)
                    .map_err(|e| ParseError::InvalidFormat(format!("(line {}) {e:#}", i + 1)))
            })
            .collect::<Result<_, _>>()?;
        Ok(Puzzle { rules, messages })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        count_matching(shared)
            .map(|n| n.to_string())
            .map_err(|e| SolveError::SolveFailed(e.into()))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        count_matching_with_loops(shared)
            .map(|n| n.to_string())
            .map_err(|e| SolveError::SolveFailed(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve;

    const EXAMPLE_1: &str = r#"0: 4 1 5
1: 2 3 | 3 2
2: 4 4 | 5 5
3: 4 5 | 5 4
4: "a"
5: "b"

ababbb
bababa
abbbab
aaabbb
aaaabbb
"#;

    const EXAMPLE_2: &str = r#"42: 9 14 | 10 1
9: 14 27 | 1 26
10: 23 14 | 28 1
1: "a"
11: 42 31
5: 1 14 | 15 1
19: 14 1 | 14 14
12: 24 14 | 19 1
16: 15 1 | 14 14
31: 14 17 | 1 13
6: 14 14 | 1 14
2: 1 24 | 14 4
0: 8 11
13: 14 3 | 1 12
15: 1 | 14
17: 14 2 | 1 7
23: 25 1 | 22 14
28: 16 1
4: 1 1
20: 14 14 | 1 15
3: 5 14 | 16 1
27: 1 6 | 14 18
14: "b"
21: 14 1 | 1 14
25: 1 1 | 1 14
22: 14 14
8: 42
26: 14 22 | 1 20
18: 15 15
7: 14 5 | 1 21
24: 14 1

abbbbbabbbaaaababbaabbbbabababbbabbbbbbabaaaa
bbabbbbaabaabba
babbbbaabbbbbabbbbbbaabaaabaaa
aaabbbbbbaaaabaababaabababbabaaabbababababaaa
bbbbbbbaaaabbbbaaabbabaaa
bbbababbbbaaaaaaaabbababaaababaabab
ababaaaaaabaaab
ababaaaaabbbaba
baabbaaaabbaaaababbaababb
abbbbabbbbaaaababbbbbbaaaababb
aaaaabbaabaaaaababaa
aaaabbaaaabbaaa
aaaabbaabbaaaaaaabbbabbbaaabbaabaaa
babaaabbbaaabaababbaabababaaab
aabbbbbaabbbaaaaaabbbbbababaaaaabbaaabba
"#;

    #[test]
    fn example_part1() {
        assert_eq!(solve::<Solver>(EXAMPLE_1, 1), "2");
        assert_eq!(solve::<Solver>(EXAMPLE_2, 1), "3");
    }

    #[test]
    fn example_part2() {
        assert_eq!(solve::<Solver>(EXAMPLE_2, 2), "12");
    }

    #[test]
    fn compiles_fragments() {
        let puzzle = Solver::parse(EXAMPLE_1).unwrap();
        let mut compiler = Compiler::new(&puzzle.rules);
        assert_eq!(compiler.pattern(4).unwrap(), "a");
        assert_eq!(compiler.pattern(2).unwrap(), "(?:aa|bb)");
        assert_eq!(compiler.min_length(0).unwrap(), 6);
    }

    #[test]
    fn undefined_rule_fails() {
        let mut puzzle = Solver::parse("0: 1 2\n1: \"a\"\n\na\n").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut puzzle).is_err());
    }

    #[test]
    fn part2_requires_standard_rule_zero() {
        let mut puzzle = Solver::parse(EXAMPLE_1).unwrap();
        assert!(<Solver as PartSolver<2>>::solve(&mut puzzle).is_err());
    }
}
