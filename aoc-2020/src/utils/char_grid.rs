//! Rectangular byte grid for map-style puzzle inputs

use aoc_solver::ParseError;
use std::fmt;

/// Row-major grid of ASCII cells, `(x, y)` with `x` growing right and `y` down
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharGrid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl CharGrid {
    /// Parse non-empty lines into a grid, requiring every row to have the same width
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut width = None;
        let mut cells = Vec::new();
        let mut height = 0;

        for (idx, line) in input.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            match width {
                None => width = Some(line.len()),
                Some(w) if w != line.len() => {
                    return Err(ParseError::InvalidFormat(format!(
                        "(line {}) row has width {} but expected {w}",
                        idx + 1,
                        line.len()
                    )));
                }
                Some(_) => {}
            }
            cells.extend_from_slice(line.as_bytes());
            height += 1;
        }

        let width = width.ok_or_else(|| ParseError::MissingData("empty grid".into()))?;
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Grid of the given size with every cell set to `fill`
    pub fn filled(width: usize, height: usize, fill: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    /// Cell at `(x + dx, y + dy)`, or `None` when that falls off the grid
    #[inline]
    pub fn get_offset(&self, x: usize, y: usize, dx: isize, dy: isize) -> Option<u8> {
        self.get(x.checked_add_signed(dx)?, y.checked_add_signed(dy)?)
    }

    /// Overwrite a cell. Out of range coordinates are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = value;
        }
    }

    pub fn row(&self, y: usize) -> &[u8] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    pub fn column(&self, x: usize) -> Vec<u8> {
        (0..self.height).map(|y| self.cells[y * self.width + x]).collect()
    }

    /// Number of cells equal to `value`
    pub fn count(&self, value: u8) -> usize {
        self.cells.iter().filter(|&&c| c == value).count()
    }

    /// Coordinates of every cell equal to `value`, row by row
    pub fn positions(&self, value: u8) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(move |&(_, &c)| c == value)
            .map(move |(i, _)| (i % width, i / width))
    }

    /// Copy of the grid rotated 90 degrees clockwise
    pub fn rotate(&self) -> Self {
        let (width, height) = (self.height, self.width);
        let mut cells = Vec::with_capacity(self.cells.len());
        for y in 0..height {
            for x in 0..width {
                cells.push(self.cells[(self.height - 1 - x) * self.width + y]);
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Copy of the grid mirrored left to right
    pub fn flip_horizontal(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for y in 0..self.height {
            cells.extend(self.row(y).iter().rev());
        }
        Self {
            cells,
            ..*self
        }
    }

    /// Copy of the grid mirrored top to bottom
    pub fn flip_vertical(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for y in (0..self.height).rev() {
            cells.extend_from_slice(self.row(y));
        }
        Self {
            cells,
            ..*self
        }
    }

    /// All eight rotations and reflections, starting with the grid itself
    pub fn orientations(&self) -> Vec<Self> {
        let mut out = Vec::with_capacity(8);
        let mut current = self.clone();
        for _ in 0..4 {
            out.push(current.flip_horizontal());
            let next = current.rotate();
            out.push(current);
            current = next;
        }
        out.swap(0, 1);
        out
    }

    /// Rows joined with `\n`, without a trailing newline
    pub fn render(&self) -> String {
        (0..self.height)
            .map(|y| String::from_utf8_lossy(self.row(y)).into_owned())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for CharGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
