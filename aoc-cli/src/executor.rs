//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::input::{ExpectedAnswers, InputStore};
use aoc_solver::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;
use tracing::{debug, warn};

/// Outcome of comparing an answer with the recorded one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Correct,
    Incorrect { expected: String },
    /// No answer recorded for this part
    Unknown,
}

impl Verification {
    fn check(answer: &str, expected: Option<&str>) -> Self {
        match expected {
            Some(expected) if expected == answer => Verification::Correct,
            Some(expected) => Verification::Incorrect {
                expected: expected.to_string(),
            },
            None => Verification::Unknown,
        }
    }
}

/// Result from a single solver execution
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    /// Set on the first part solved from each parsed instance
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
    /// Present only when verifying
    pub verification: Option<Verification>,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: ArcExecutorError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
            verification: None,
        }
    }
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    context: RunContext,
    thread_pool: rayon::ThreadPool,
}

/// Everything a worker thread needs, shared by reference across the pool
struct RunContext {
    registry: SolverRegistry,
    inputs: InputStore,
    verify: bool,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            context: RunContext {
                registry,
                inputs: InputStore::new(config.input_dir.clone()),
                verify: config.verify,
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.context;
        cfg.registry
            .storage()
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: self.filter_parts(info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Filter parts based on the part filter and the solver's part count
    #[allow(clippy::reversed_empty_ranges)]
    fn filter_parts(&self, max_parts: u8) -> RangeInclusive<u8> {
        match self.context.part_filter {
            Some(p) if p <= max_parts => p..=p,
            Some(_) => 1..=0,
            None => 1..=max_parts,
        }
    }

    /// Work items whose input file is absent
    pub fn missing_inputs(&self, work_items: &[WorkItem]) -> Vec<(u16, u8)> {
        work_items
            .iter()
            .filter(|w| !self.context.inputs.contains(w.year, w.day))
            .map(|w| (w.year, w.day))
            .collect()
    }

    /// Execute all work items and send results to channel
    ///
    /// Per-part failures travel as results; only infrastructure failures
    /// (a closed channel) are returned here.
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();

        match self.context.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in &work_items {
                    if let Err(e) = run_work_item(work, &tx, &self.context) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel_grouped(by_year, &tx)
            }
            // Part additionally splits each item's parts inside run_work_item
            ParallelizeBy::Day | ParallelizeBy::Part => self.execute_parallel(work_items, &tx),
        }
    }

    fn execute_parallel(
        &self,
        work_items: Vec<WorkItem>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let context = &self.context;

        self.thread_pool.install(|| {
            work_items
                .into_par_iter()
                .map_with(tx.clone(), |tx, work| run_work_item(&work, tx, context).err())
                .reduce(|| None, merge_errors)
                .map_or(Ok(()), Err)
        })
    }

    /// Groups run in parallel, items within a group in order
    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let context = &self.context;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map_with(tx.clone(), |tx, items| {
                    items
                        .iter()
                        .map(|work| run_work_item(work, tx, context).err())
                        .fold(None, merge_errors)
                })
                .reduce(|| None, merge_errors)
                .map_or(Ok(()), Err)
        })
    }
}

fn merge_errors(
    first: Option<ArcExecutorError>,
    second: Option<ArcExecutorError>,
) -> Option<ArcExecutorError> {
    match (first, second) {
        (Some(first), Some(second)) => Some(ArcExecutorError::combine(first, second)),
        (first, second) => first.or(second),
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Send the same failure for every part of a work item
fn send_failed(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    error: ArcExecutorError,
) -> Result<(), ArcExecutorError> {
    for part in work.parts.clone() {
        send(tx, SolverResult::failed(work.year, work.day, part, error.clone()))?;
    }
    Ok(())
}

/// Load the input for one year/day and solve its parts
fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    context: &RunContext,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let input = match context.inputs.input(year, day) {
        Ok(input) => input,
        Err(source) => {
            debug!(year, day, %source, "skipping puzzle without input");
            return send_failed(work, tx, ExecutorError::Input { year, day, source }.into());
        }
    };
    let expected = expectations(year, day, context);

    if matches!(context.parallelize_by, ParallelizeBy::Part) {
        run_parts_parallel(work, &input, expected.as_ref(), tx, context)
    } else {
        run_parts_sequential(work, &input, expected.as_ref(), tx, context)
    }
}

/// Recorded answers when verifying; an unreadable answers file verifies as unknown
fn expectations(year: u16, day: u8, context: &RunContext) -> Option<ExpectedAnswers> {
    if !context.verify {
        return None;
    }
    match context.inputs.expected_answers(year, day) {
        Ok(answers) => Some(answers),
        Err(e) => {
            warn!(year, day, "{e}");
            Some(ExpectedAnswers::default())
        }
    }
}

/// Parse once and solve the parts in order, so part 2 sees part 1's mutations
fn run_parts_sequential(
    work: &WorkItem,
    input: &str,
    expected: Option<&ExpectedAnswers>,
    tx: &Sender<SolverResult>,
    context: &RunContext,
) -> Result<(), ArcExecutorError> {
    let mut solver = match context.registry.create_solver(work.year, work.day, input) {
        Ok(solver) => solver,
        Err(e) => return send_failed(work, tx, ExecutorError::Solver(e).into()),
    };

    let mut parse_duration = Some(solver.parse_duration());
    for part in work.parts.clone() {
        send(
            tx,
            solve_part(&mut *solver, part, parse_duration.take(), expected),
        )?;
    }
    Ok(())
}

/// Parse separately for every part and solve them concurrently
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    expected: Option<&ExpectedAnswers>,
    tx: &Sender<SolverResult>,
    context: &RunContext,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    work.parts
        .clone()
        .into_par_iter()
        .map_with(tx.clone(), |tx, part| {
            let result = match context.registry.create_solver(year, day, input) {
                Ok(mut solver) => {
                    let parse_duration = solver.parse_duration();
                    solve_part(&mut *solver, part, Some(parse_duration), expected)
                }
                Err(e) => SolverResult::failed(year, day, part, ExecutorError::Solver(e).into()),
            };
            send(tx, result).err()
        })
        .reduce(|| None, merge_errors)
        .map_or(Ok(()), Err)
}

fn solve_part(
    solver: &mut dyn DynSolver,
    part: u8,
    parse_duration: Option<TimeDelta>,
    expected: Option<&ExpectedAnswers>,
) -> SolverResult {
    let (year, day) = (solver.year(), solver.day());

    match solver.solve(part) {
        Ok(solved) => {
            let solve_duration = solved.duration();
            let verification =
                expected.map(|answers| Verification::check(&solved.answer, answers.get(part)));
            SolverResult {
                year,
                day,
                part,
                answer: Ok(solved.answer),
                parse_duration,
                solve_duration,
                verification,
            }
        }
        Err(e) => SolverResult {
            parse_duration,
            ..SolverResult::failed(
                year,
                day,
                part,
                ExecutorError::Solver(aoc_solver::SolverError::from(e)).into(),
            )
        },
    }
}
