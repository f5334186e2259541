use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, RegistrationError,
    SolveError, SolverError, SolverRegistryBuilder,
};

/// Customs declaration forms: groups of answer lines
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2030, day = 6, tags = ["test", "groups"])]
struct Customs;

impl AocParser for Customs {
    type SharedData<'a> = Vec<Vec<&'a str>>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input
            .split("\n\n")
            .map(|group| group.lines().collect())
            .collect())
    }
}

impl PartSolver<1> for Customs {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

impl PartSolver<2> for Customs {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(Vec::len).sum::<usize>().to_string())
    }
}

/// Single part solver without tags
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2030, day = 25)]
struct Handshake;

impl AocParser for Handshake {
    type SharedData<'a> = u64;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .trim()
            .parse()
            .map_err(|_| ParseError::InvalidFormat(format!("not a key: {input:?}")))
    }
}

impl PartSolver<1> for Handshake {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok((*shared * 7 % 20201227).to_string())
    }
}

#[test]
fn derived_plugins_are_discovered() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .expect("plugins register")
        .build();

    let storage = registry.storage();
    assert_eq!(storage.len(), 2);
    assert_eq!(storage.get_info(2030, 6).map(|i| i.parts), Some(2));
    assert_eq!(storage.get_info(2030, 25).map(|i| i.parts), Some(1));

    let days: Vec<_> = storage.iter_info().map(|i| (i.year, i.day)).collect();
    assert_eq!(days, vec![(2030, 6), (2030, 25)]);
}

#[test]
fn registered_solver_answers_every_part() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();

    let mut solver = registry
        .create_solver(2030, 6, "abc\n\na\nb\nc\n\nab\nac")
        .unwrap();
    assert_eq!(solver.parts(), 2);
    assert_eq!(solver.solve(1).unwrap().answer, "3");
    assert_eq!(solver.solve(2).unwrap().answer, "6");
    assert!(matches!(solver.solve(3), Err(SolveError::PartOutOfRange(3))));
}

#[test]
fn plugins_can_be_filtered_by_tag() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"groups"))
        .unwrap()
        .build();

    assert!(registry.storage().contains(2030, 6));
    assert!(!registry.storage().contains(2030, 25));
    assert!(matches!(
        registry.create_solver(2030, 25, "5764801"),
        Err(SolverError::NotFound(2030, 25))
    ));
}

#[test]
fn registering_plugins_twice_is_rejected() {
    let result = SolverRegistryBuilder::new()
        .register_all_plugins()
        .and_then(|builder| builder.register_all_plugins());

    assert!(matches!(
        result,
        Err(RegistrationError::DuplicateSolver(2030, _))
    ));
}

#[test]
fn parse_failures_surface_through_registry() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();

    let err = registry.create_solver(2030, 25, "door").err().unwrap();
    assert!(matches!(err, SolverError::ParseError(ParseError::InvalidFormat(_))));
}
