use crate::utils::text::blocks;
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;
use std::ops::RangeInclusive;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 16, tags = ["2020"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule<'a> {
    name: &'a str,
    ranges: [RangeInclusive<u32>; 2],
}

impl Rule<'_> {
    fn accepts(&self, value: u32) -> bool {
        self.ranges.iter().any(|r| r.contains(&value))
    }
}

#[derive(Debug)]
pub struct Notes<'a> {
    rules: Vec<Rule<'a>>,
    mine: Vec<u32>,
    nearby: Vec<Vec<u32>>,
}

impl Notes<'_> {
    fn fits_any_rule(&self, value: u32) -> bool {
        self.rules.iter().any(|rule| rule.accepts(value))
    }

    /// Field name for every ticket position, using only tickets without invalid values
    pub fn resolve_fields(&self) -> anyhow::Result<Vec<&str>> {
        let positions = self.mine.len();
        let valid: Vec<_> = self
            .nearby
            .iter()
            .filter(|ticket| ticket.iter().all(|&v| self.fits_any_rule(v)))
            .collect();

        // candidates[pos]: indices of rules every valid ticket satisfies at pos
        let mut candidates: Vec<Vec<usize>> = (0..positions)
            .map(|pos| {
                (0..self.rules.len())
                    .filter(|&r| {
                        valid
                            .iter()
                            .filter_map(|ticket| ticket.get(pos))
                            .all(|&v| self.rules[r].accepts(v))
                    })
                    .collect()
            })
            .collect();

        let mut assigned: Vec<Option<usize>> = vec![None; positions];
        while let Some(pos) =
            (0..positions).find(|&p| assigned[p].is_none() && candidates[p].len() == 1)
        {
            let rule = candidates[pos][0];
            assigned[pos] = Some(rule);
            for other in candidates.iter_mut() {
                other.retain(|&r| r != rule);
            }
        }

        assigned
            .into_iter()
            .enumerate()
            .map(|(pos, rule)| {
                rule.map(|r| self.rules[r].name)
                    .ok_or_else(|| anyhow!("position {pos} cannot be resolved by elimination"))
            })
            .collect()
    }
}

fn parse_ticket(line: &str) -> Result<Vec<u32>, ParseError> {
    line.split(',')
        .map(|v| {
            v.parse()
                .map_err(|_| ParseError::InvalidFormat(format!("bad ticket value {v:?}")))
        })
        .collect()
}

impl AocParser for Solver {
    type SharedData<'a> = Notes<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let [rules, mine, nearby] = <[Vec<&str>; 3]>::try_from(blocks(input))
            .map_err(|b| {
                ParseError::InvalidFormat(format!("expected 3 sections, got {}", b.len()))
            })?;

        let re = Regex::new(r"^([^:]+): (\d+)-(\d+) or (\d+)-(\d+)$")
            .map_err(|e| ParseError::Other(e.to_string()))?;
        let rules = rules
            .into_iter()
            .map(|line| -> Result<Rule<'a>, ParseError> {
                let (_, [name, a, b, c, d]) = re
                    .captures(line)
                    .ok_or_else(|| ParseError::InvalidFormat(format!("bad rule {line:?}")))?
                    .extract();
                let n = |s: &str| {
                    s.parse::<u32>()
                        .map_err(|_| ParseError::InvalidFormat(format!("bad bound {s:?}")))
                };
                Ok(Rule {
                    name,
                    ranges: [n(a)?..=n(b)?, n(c)?..=n(d)?],
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mine = match mine.as_slice() {
            ["your ticket:", ticket] => parse_ticket(ticket)?,
            _ => return Err(ParseError::InvalidFormat("bad `your ticket:` section".into())),
        };
        let nearby = match nearby.split_first() {
            Some((&"nearby tickets:", tickets)) => tickets
                .iter()
                .map(|t| parse_ticket(t))
                .collect::<Result<_, _>>()?,
            _ => return Err(ParseError::InvalidFormat("bad `nearby tickets:` section".into())),
        };

        Ok(Notes {
            rules,
            mine,
            nearby,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let rate: u32 = shared
            .nearby
            .iter()
            .flatten()
            .filter(|&&v| !shared.fits_any_rule(v))
            .sum();
        Ok(rate.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let fields = shared
            .resolve_fields()
            .map_err(|e| SolveError::SolveFailed(e.into()))?;
        let product: u64 = fields
            .iter()
            .zip(&shared.mine)
            .filter(|(name, _)| name.starts_with("departure"))
            .map(|(_, &v)| v as u64)
            .product();
        Ok(product.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve;

    const EXAMPLE_1: &str = "\
class: 1-3 or 5-7
row: 6-11 or 33-44
seat: 13-40 or 45-50

your ticket:
7,1,14

nearby tickets:
7,3,47
40,4,50
55,2,20
38,6,12
";

    const EXAMPLE_2: &str = "\
class: 0-1 or 4-19
row: 0-5 or 8-19
seat: 0-13 or 16-19

your ticket:
11,12,13

nearby tickets:
3,9,18
15,1,5
5,14,9
";

    #[test]
    fn example_part1() {
        assert_eq!(solve::<Solver>(EXAMPLE_1, 1), "71");
    }

    #[test]
    fn resolves_field_positions() {
        let notes = Solver::parse(EXAMPLE_2).unwrap();
        let fields = notes.resolve_fields().unwrap();
        assert_eq!(fields, vec!["row", "class", "seat"]);
        let values: Vec<_> = fields.iter().zip(&notes.mine).collect();
        assert_eq!(values, vec![(&"row", &11), (&"class", &12), (&"seat", &13)]);
    }

    #[test]
    fn departure_product() {
        let input = EXAMPLE_2
            .replace("class:", "departure class:")
            .replace("seat:", "departure seat:");
        assert_eq!(solve::<Solver>(&input, 2), (12 * 13).to_string());
    }

    #[test]
    fn missing_section_is_rejected() {
        assert!(Solver::parse("class: 1-3 or 5-7\n\nyour ticket:\n7,1,14\n").is_err());
    }
}
