//! Output formatting for solver results

use crate::executor::{SolverResult, Verification};
use chrono::TimeDelta;

/// Output formatter for solver results
pub struct OutputFormatter {
    quiet: bool,
    start_time: std::time::Instant,
}

/// Counts shown in the summary
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub solved: usize,
    pub failed: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub unknown: usize,
}

impl Tally {
    pub fn of(results: &[SolverResult]) -> Self {
        results.iter().fold(Tally::default(), |mut tally, r| {
            match &r.answer {
                Ok(_) => tally.solved += 1,
                Err(_) => tally.failed += 1,
            }
            match &r.verification {
                Some(Verification::Correct) => tally.correct += 1,
                Some(Verification::Incorrect { .. }) => tally.incorrect += 1,
                Some(Verification::Unknown) => tally.unknown += 1,
                None => {}
            }
            tally
        })
    }
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: std::time::Instant::now(),
        }
    }

    /// Format and print a single result
    pub fn print_result(&self, result: &SolverResult) {
        if self.quiet {
            self.print_quiet(result);
        } else {
            self.print_full(result);
        }
    }

    /// Print in quiet mode (just the answer)
    fn print_quiet(&self, result: &SolverResult) {
        match &result.answer {
            Ok(answer) => println!("{}", answer),
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    /// Print full output with timing and verification info
    fn print_full(&self, result: &SolverResult) {
        let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);

        match &result.answer {
            Ok(answer) => {
                let parse_timing = result
                    .parse_duration
                    .map(|d| format!("parse: {}, ", format_duration(d)))
                    .unwrap_or_default();
                let verification = result
                    .verification
                    .as_ref()
                    .map(|v| format!(", {}", format_verification(v)))
                    .unwrap_or_default();

                println!(
                    "{}: {} ({}solve: {}{})",
                    prefix,
                    answer,
                    parse_timing,
                    format_duration(result.solve_duration),
                    verification
                );
            }
            Err(e) => {
                eprintln!("{}: Error - {}", prefix, e);
            }
        }
    }

    /// Print a summary after all results
    ///
    /// Shows both the summed compute time and the elapsed wall-clock time.
    pub fn print_summary(&self, results: &[SolverResult], verify: bool) {
        if self.quiet {
            return;
        }

        let tally = Tally::of(results);
        let total_parse_time: TimeDelta = results.iter().filter_map(|r| r.parse_duration).sum();
        let total_solve_time: TimeDelta = results
            .iter()
            .filter(|r| r.answer.is_ok())
            .map(|r| r.solve_duration)
            .sum();
        let total_compute_time = total_parse_time + total_solve_time;
        let elapsed_time = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!("Solvers: {} solved, {} failed", tally.solved, tally.failed);
        if verify {
            println!(
                "Verified: {} correct, {} incorrect, {} unknown",
                tally.correct, tally.incorrect, tally.unknown
            );
        }
        println!("Total parse time: {}", format_duration(total_parse_time));
        println!("Total solve time: {}", format_duration(total_solve_time));
        println!(
            "Elapsed wall-clock time: {}",
            format_std_duration(elapsed_time)
        );
        if !elapsed_time.is_zero() {
            let total_compute_secs =
                total_compute_time.num_microseconds().unwrap_or(0) as f64 / 1_000_000.0;
            println!(
                "Speedup factor: {:.2}x",
                total_compute_secs / elapsed_time.as_secs_f64()
            );
        }
    }
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

fn format_verification(verification: &Verification) -> String {
    match verification {
        Verification::Correct => "✓ correct".to_string(),
        Verification::Incorrect { expected } => format!("✗ expected {}", expected),
        Verification::Unknown => "? no recorded answer".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExecutorError;
    use std::time::Duration;

    #[test]
    fn durations_pick_a_unit() {
        assert_eq!(format_duration(TimeDelta::microseconds(250)), "250µs");
        assert_eq!(format_duration(TimeDelta::microseconds(1500)), "1.50ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(2500)), "2.50s");
        assert_eq!(format_duration(TimeDelta::microseconds(-40)), "-40µs");
        assert_eq!(format_std_duration(Duration::from_micros(999)), "999µs");
        assert_eq!(format_std_duration(Duration::from_millis(12)), "12.00ms");
    }

    #[test]
    fn verification_labels() {
        assert_eq!(format_verification(&Verification::Correct), "✓ correct");
        assert_eq!(
            format_verification(&Verification::Incorrect {
                expected: "42".to_string()
            }),
            "✗ expected 42"
        );
    }

    #[test]
    fn tally_counts_outcomes() {
        let result = |answer: Result<String, ExecutorError>, verification| SolverResult {
            year: 2020,
            day: 1,
            part: 1,
            answer: answer.map_err(Into::into),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
            verification,
        };
        let results = vec![
            result(Ok("1".into()), Some(Verification::Correct)),
            result(
                Ok("2".into()),
                Some(Verification::Incorrect {
                    expected: "3".into(),
                }),
            ),
            result(Ok("4".into()), Some(Verification::Unknown)),
            result(Err(ExecutorError::ChannelSend), None),
        ];

        assert_eq!(
            Tally::of(&results),
            Tally {
                solved: 3,
                failed: 1,
                correct: 1,
                incorrect: 1,
                unknown: 1,
            }
        );
    }
}
