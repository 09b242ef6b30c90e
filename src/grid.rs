//! Contains the [`Grid`] of paint state shared between the converter, the editor, and export.

use crate::{Error, GridSize, Result};
use palette::Srgb;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt::Display, str::FromStr};

/// A single grid cell: either a color or empty (unpainted / transparent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// An unpainted or fully transparent cell.
    #[default]
    Empty,
    /// A painted cell.
    Color(Srgb<u8>),
}

impl Cell {
    /// Creates a painted cell.
    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::Color(Srgb::new(red, green, blue))
    }

    /// Whether the cell is [`Cell::Empty`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The color of the cell, if painted.
    #[must_use]
    pub const fn color(&self) -> Option<Srgb<u8>> {
        match *self {
            Self::Empty => None,
            Self::Color(color) => Some(color),
        }
    }
}

impl From<Srgb<u8>> for Cell {
    fn from(color: Srgb<u8>) -> Self {
        Self::Color(color)
    }
}

impl From<Option<Srgb<u8>>> for Cell {
    fn from(color: Option<Srgb<u8>>) -> Self {
        color.map_or(Self::Empty, Self::Color)
    }
}

/// Formats an empty cell as `""` and a painted cell as lowercase `#rrggbb`.
impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Color(c) => write!(f, "#{:02x}{:02x}{:02x}", c.red, c.green, c.blue),
        }
    }
}

/// Parses `""` as an empty cell and `#RRGGBB` (any case) as a painted cell.
impl FromStr for Cell {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::Empty);
        }

        // only the long form with a leading `#`
        match s.strip_prefix('#') {
            Some(hex) if hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()) => s
                .parse::<Srgb<u8>>()
                .map(Self::Color)
                .map_err(|_| Error::ParseColor(s.to_owned())),
            _ => Err(Error::ParseColor(s.to_owned())),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// A square, row-major `N×N` grid of [`Cell`]s. Row `0` is the top row.
///
/// A grid is always complete: every producer writes a full `N×N` grid,
/// and replacing a grid swaps it wholesale.
/// [`Grid::paint`] is the only operation that touches a single cell.
///
/// # Examples
/// ```
/// # use pixelette::{Cell, Grid, GridSize, Error};
/// # fn main() -> Result<(), Error> {
/// let mut grid = Grid::empty(GridSize::try_from(8u16)?);
/// grid.paint(2, 3, Cell::rgb(255, 0, 0))?;
/// assert_eq!(grid.get(2, 3), Some(Cell::rgb(255, 0, 0)));
/// assert_eq!(grid.get(3, 2), Some(Cell::Empty));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// The edge length of the grid.
    size: GridSize,
    /// The `size²` cells in row-major order.
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid where every cell is [`Cell::Empty`].
    #[must_use]
    pub fn empty(size: GridSize) -> Self {
        Self { size, cells: vec![Cell::Empty; size.num_cells()] }
    }

    /// Creates a grid from row-major cells whose length is already known to be `size²`.
    pub(crate) fn from_cells_unchecked(size: GridSize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), size.num_cells());
        Self { size, cells }
    }

    /// Creates a grid from `size²` row-major cells.
    ///
    /// # Errors
    /// Returns [`Error::ShapeMismatch`] if `cells.len() != size²`.
    pub fn from_cells(size: GridSize, cells: Vec<Cell>) -> Result<Self> {
        if cells.len() == size.num_cells() {
            Ok(Self { size, cells })
        } else {
            Err(Error::ShapeMismatch {
                expected: size.len(),
                found: format!("{} cells", cells.len()),
            })
        }
    }

    /// Creates a grid from a list of rows.
    ///
    /// # Errors
    /// Returns [`Error::InvalidGridSize`] for an empty list of rows,
    /// and [`Error::ShapeMismatch`] if any row length differs from the number of rows.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let size = GridSize::try_from(rows.len())?;

        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != size.len()) {
            return Err(Error::ShapeMismatch {
                expected: size.len(),
                found: format!("row {i} with {} cells", row.len()),
            });
        }

        let cells = rows.into_iter().flatten().collect();
        Ok(Self { size, cells })
    }

    /// The edge length of the grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// The cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterates over the rows of the grid, top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.size.len())
    }

    /// Copies the grid into a list of rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(<[Cell]>::to_vec).collect()
    }

    /// The index into `cells` for the given coordinate.
    fn index(&self, row: usize, col: usize) -> Result<usize> {
        let n = self.size.len();
        if row < n && col < n {
            Ok(row * n + col)
        } else {
            Err(Error::OutOfBounds { row, col, size: self.size.get() })
        }
    }

    /// Returns the cell at `row` and `col`, or `None` if it is outside of the grid.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.index(row, col).ok().map(|i| self.cells[i])
    }

    /// Sets exactly one cell, leaving all others untouched, and returns its previous value.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if the coordinate is outside of the grid.
    pub fn paint(&mut self, row: usize, col: usize, cell: impl Into<Cell>) -> Result<Cell> {
        let i = self.index(row, col)?;
        Ok(std::mem::replace(&mut self.cells[i], cell.into()))
    }

    /// Clears exactly one cell and returns its previous value.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if the coordinate is outside of the grid.
    pub fn erase(&mut self, row: usize, col: usize) -> Result<Cell> {
        self.paint(row, col, Cell::Empty)
    }

    /// Clears every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Replaces the whole grid with `other`, which must have the same size.
    ///
    /// # Errors
    /// Returns [`Error::ShapeMismatch`] if the sizes differ. The grid is left untouched in that case.
    pub fn replace(&mut self, other: Grid) -> Result<()> {
        if other.size != self.size {
            return Err(Error::ShapeMismatch {
                expected: self.size.len(),
                found: format!("{0}x{0} grid", other.size),
            });
        }

        *self = other;
        Ok(())
    }

    /// Changes the grid size. Like the editor, this discards the current content.
    pub fn resize(&mut self, size: GridSize) {
        *self = Self::empty(size);
    }

    /// Whether every cell is [`Cell::Empty`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }

    /// The number of painted cells.
    #[must_use]
    pub fn painted(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// The distinct colors used in the grid, in row-major order of first use.
    #[must_use]
    pub fn distinct_colors(&self) -> Vec<Srgb<u8>> {
        let mut colors = Vec::new();
        for color in self.cells.iter().filter_map(Cell::color) {
            if !colors.contains(&color) {
                colors.push(color);
            }
        }
        colors
    }
}
