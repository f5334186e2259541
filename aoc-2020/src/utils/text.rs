//! Line and block splitting with per-line error context

use aoc_solver::ParseError;

/// Split input into blank-line separated blocks
///
/// Accepts `\n` and `\r\n` line endings. Leading, trailing and repeated blank
/// lines never produce empty blocks. Each block is returned as its lines.
pub fn blocks(input: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for line in input.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

/// Parse every non-empty line with `f`, prefixing failures with `(line N)`
///
/// Line numbers are 1-based and count blank lines, so they match what an
/// editor shows.
pub fn parse_lines<'a, T, F>(input: &'a str, mut f: F) -> Result<Vec<T>, ParseError>
where
    F: FnMut(&'a str) -> anyhow::Result<T>,
{
    input
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx, line.trim_end()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(idx, line)| {
            f(line).map_err(|e| ParseError::InvalidFormat(format!("(line {}) {e:#}", idx + 1)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn blocks_ignore_extra_blank_lines() {
        let input = "\nabc\n\na\nb\n\n\n\nab\r\nac\r\n\r\n";
        assert_eq!(
            blocks(input),
            vec![vec!["abc"], vec!["a", "b"], vec!["ab", "ac"]]
        );
    }

    #[test]
    fn blocks_of_empty_input() {
        assert!(blocks("").is_empty());
        assert!(blocks("\n\n").is_empty());
    }

    #[test]
    fn parse_lines_skips_blank_lines() {
        let values = parse_lines("1\n\n2\r\n3\n", |l| Ok(l.parse::<u32>()?)).unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn parse_lines_reports_line_number() {
        let err = parse_lines("1\n2\n\nx", |l| l.parse::<u32>().context("not a number"))
            .unwrap_err();
        let msg = match err {
            ParseError::InvalidFormat(msg) => msg,
            other => panic!("unexpected error kind: {other:?}"),
        };
        assert!(msg.starts_with("(line 4) not a number"), "{msg}");
    }
}
