//! Local puzzle inputs and recorded answers

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

/// Read-only view of an input directory
///
/// Layout: `{dir}/{year}_day{day:02}.txt` for the puzzle input and
/// `{dir}/{year}_day{day:02}.answers` for expected answers, one per line
/// in part order.
#[derive(Debug, Clone)]
pub struct InputStore {
    dir: PathBuf,
}

impl InputStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of the puzzle input for a specific year/day
    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        self.dir.join(format!("{}_day{:02}.txt", year, day))
    }

    /// Path of the expected answers for a specific year/day
    pub fn answers_path(&self, year: u16, day: u8) -> PathBuf {
        self.dir.join(format!("{}_day{:02}.answers", year, day))
    }

    /// Check if the puzzle input exists
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.input_path(year, day).is_file()
    }

    /// Read the puzzle input
    pub fn input(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.input_path(year, day);
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => InputError::Missing(path),
            _ => InputError::Read {
                path,
                source: Arc::new(e),
            },
        })
    }

    /// Expected answers indexed by `part - 1`
    ///
    /// A missing file yields no expectations. Blank lines leave that part
    /// without an expectation.
    pub fn expected_answers(&self, year: u16, day: u8) -> Result<ExpectedAnswers, InputError> {
        let path = self.answers_path(year, day);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(ExpectedAnswers::parse(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(ExpectedAnswers::default()),
            Err(e) => Err(InputError::Read {
                path,
                source: Arc::new(e),
            }),
        }
    }
}

/// Recorded answers for one puzzle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedAnswers(Vec<Option<String>>);

impl ExpectedAnswers {
    fn parse(content: &str) -> Self {
        Self(
            content
                .lines()
                .map(str::trim)
                .map(|line| (!line.is_empty()).then(|| line.to_string()))
                .collect(),
        )
    }

    /// Expected answer for `part`, if one was recorded
    pub fn get(&self, part: u8) -> Option<&str> {
        let index = usize::from(part).checked_sub(1)?;
        self.0.get(index)?.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn paths_follow_layout() {
        let store = InputStore::new(PathBuf::from("inputs"));
        assert_eq!(store.input_path(2020, 1), PathBuf::from("inputs/2020_day01.txt"));
        assert_eq!(
            store.answers_path(2020, 25),
            PathBuf::from("inputs/2020_day25.answers")
        );
    }

    #[test]
    fn reads_existing_input() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());

        assert!(!store.contains(2020, 6));
        assert!(matches!(store.input(2020, 6), Err(InputError::Missing(_))));

        fs::write(temp.path().join("2020_day06.txt"), "abc\n\na\nb\n").unwrap();
        assert!(store.contains(2020, 6));
        assert_eq!(store.input(2020, 6).unwrap(), "abc\n\na\nb\n");
    }

    #[test]
    fn directory_in_place_of_input_is_a_read_error() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("2020_day02.txt")).unwrap();
        let store = InputStore::new(temp.path().to_path_buf());

        assert!(!store.contains(2020, 2));
        assert!(store.input(2020, 2).is_err());
    }

    #[test]
    fn answers_by_part() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("2020_day01.answers"), "514579\r\n\n").unwrap();
        fs::write(temp.path().join("2020_day02.answers"), "\n241861950\n").unwrap();
        let store = InputStore::new(temp.path().to_path_buf());

        let day1 = store.expected_answers(2020, 1).unwrap();
        assert_eq!(day1.get(1), Some("514579"));
        assert_eq!(day1.get(2), None);
        assert_eq!(day1.get(0), None);

        let day2 = store.expected_answers(2020, 2).unwrap();
        assert_eq!(day2.get(1), None);
        assert_eq!(day2.get(2), Some("241861950"));
    }

    #[test]
    fn missing_answers_file_means_no_expectations() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());
        assert_eq!(
            store.expected_answers(2020, 9).unwrap(),
            ExpectedAnswers::default()
        );
    }
}
