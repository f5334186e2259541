//! Advent of Code 2020 puzzle solutions with automatic registration
//!
//! Each day lives in `year_2020::day_NN` and exposes a unit `Solver` that
//! derives `AocSolver` and `AutoRegisterSolver`, so linking this crate is
//! enough for `SolverRegistryBuilder::register_all_plugins` to find it.

pub mod utils;

#[cfg(feature = "year-2020")]
pub mod year_2020;
