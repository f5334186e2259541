//! Advent of Code Solver Library
//!
//! A small framework for puzzle solvers: each day parses its input once into
//! shared data and then answers one or more parts from it.
//!
//! # Overview
//!
//! This library provides:
//! - [`AocParser`] and [`PartSolver`] for per-part implementations
//! - [`Solver`], usually derived with `#[derive(AocSolver)]`
//! - [`SolverInstance`] / [`DynSolver`] for type-erased, timed solving
//! - A registry with plugin discovery through `inventory`
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverInstance, SolverRegistryBuilder};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Report;
//!
//! impl AocParser for Report {
//!     type SharedData<'a> = Vec<u32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Report {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<u32>().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Report {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().product::<u32>().to_string())
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register_factory(2020, 1, 2, |input: &str| {
//!         Ok(Box::new(SolverInstance::<Report>::new(2020, 1, input)?))
//!     })
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2020, 1, "1\n2\n3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "6");
//! assert_eq!(solver.solve(2).unwrap().answer, "6");
//! ```
//!
//! # Plugin Registration
//!
//! `#[derive(AutoRegisterSolver)]` submits a [`SolverPlugin`] so that
//! [`SolverRegistryBuilder::register_all_plugins`] finds the solver without
//! any manual wiring:
//!
//! ```ignore
//! #[derive(AocSolver, AutoRegisterSolver)]
//! #[aoc_solver(max_parts = 2)]
//! #[aoc(year = 2020, day = 1, tags = ["2020"])]
//! pub struct Solver;
//! ```

mod error;
mod instance;
mod registry;
mod solver;

// Re-export public API
pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverFactoryStorage, SolverPlugin,
    SolverRegistry, SolverRegistryBuilder,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Re-export inventory for use by the derive macro
pub use inventory;

// Re-export the derive macros
pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
