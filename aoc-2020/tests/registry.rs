//! Every 2020 day is discovered through plugin registration

use aoc_solver::{SolveError, SolverError, SolverRegistry, SolverRegistryBuilder};

// Linking the crate is what submits the plugins
use aoc_2020 as _;

fn registry() -> SolverRegistry {
    SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"2020"))
        .expect("no duplicate registrations")
        .build()
}

#[test]
fn all_days_are_registered() {
    let registry = registry();
    let storage = registry.storage();
    assert_eq!(storage.len(), 25);

    let days: Vec<_> = storage.iter_info().map(|info| (info.year, info.day)).collect();
    let expected: Vec<_> = (1..=25).map(|day| (2020, day)).collect();
    assert_eq!(days, expected);
}

#[test]
fn part_counts() {
    let registry = registry();
    for info in registry.storage().iter_info() {
        let expected = if info.day == 25 { 1 } else { 2 };
        assert_eq!(info.parts, expected, "day {}", info.day);
    }
}

#[test]
fn solves_through_registry() {
    let registry = registry();
    let mut solver = registry
        .create_solver(2020, 1, "1721\n979\n366\n299\n675\n1456\n")
        .unwrap();

    assert_eq!((solver.year(), solver.day(), solver.parts()), (2020, 1, 2));
    assert!(solver.parse_duration() >= chrono::TimeDelta::zero());

    let part1 = solver.solve(1).unwrap();
    assert_eq!(part1.answer, "514579");
    assert!(part1.duration() >= chrono::TimeDelta::zero());
    assert_eq!(solver.solve(2).unwrap().answer, "241861950");
    assert!(matches!(solver.solve(3), Err(SolveError::PartOutOfRange(3))));
}

#[test]
fn parse_errors_are_reported() {
    let registry = registry();
    assert!(matches!(
        registry.create_solver(2020, 5, "FBFBBFFRLX"),
        Err(SolverError::ParseError(_))
    ));
}

#[test]
fn other_years_are_absent() {
    let registry = registry();
    assert!(matches!(
        registry.create_solver(2021, 1, "1"),
        Err(SolverError::NotFound(2021, 1))
    ));
    assert!(matches!(
        registry.create_solver(2014, 1, "1"),
        Err(SolverError::InvalidYearDay(2014, 1))
    ));
}
