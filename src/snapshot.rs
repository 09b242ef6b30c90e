//! Persisting a [`Grid`] as a small JSON record.
//!
//! The record looks like this:
//! ```json
//! {"version":1,"gridData":[["#ff0000",""],["","#0000ff"]],"size":2,"timestamp":1718000000000}
//! ```
//! Saved records can always be loaded again.
//! Loading never fails: a missing, corrupted, or inconsistent record
//! is logged and replaced by an empty grid of the caller's default size.

use crate::{Cell, Grid, GridSize, Result};
use serde::{Deserialize, Serialize};

/// The record version written by [`save`].
pub const SNAPSHOT_VERSION: u32 = 1;

/// The default for records written before versioning.
const fn legacy_version() -> u32 {
    SNAPSHOT_VERSION
}

/// The serialized form of a saved [`Grid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// The record format version.
    #[serde(default = "legacy_version")]
    pub version: u32,
    /// The grid as a list of rows of `""` or `#rrggbb` strings.
    pub grid_data: Vec<Vec<Cell>>,
    /// The grid edge length.
    pub size: u32,
    /// When the snapshot was taken, in Unix milliseconds.
    #[serde(default)]
    pub timestamp: i64,
}

impl Snapshot {
    /// Captures the current state of `grid`, stamped with the current time.
    #[must_use]
    pub fn capture(grid: &Grid) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            grid_data: grid.to_rows(),
            size: grid.size().get().into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Validates the snapshot and converts it back into a [`Grid`].
    ///
    /// Returns a description of the first problem found if the snapshot is inconsistent.
    fn into_grid(self) -> Result<Grid, String> {
        if self.version != SNAPSHOT_VERSION {
            return Err(format!("unsupported version {}", self.version));
        }

        let size = GridSize::try_from(self.size).map_err(|e| e.to_string())?;
        let grid = Grid::from_rows(self.grid_data).map_err(|e| e.to_string())?;

        if grid.size() == size {
            Ok(grid)
        } else {
            Err(format!("stored size {size} does not match {0}x{0} grid data", grid.size()))
        }
    }
}

impl From<&Grid> for Snapshot {
    fn from(grid: &Grid) -> Self {
        Self::capture(grid)
    }
}

/// Serializes `grid` into a snapshot record.
///
/// # Errors
/// Returns [`Error::Serialize`](crate::Error::Serialize) if serialization fails.
///
/// # Examples
/// ```
/// # use pixelette::{snapshot, Cell, Grid, GridSize, Error};
/// # fn main() -> Result<(), Error> {
/// let size = GridSize::try_from(4u16)?;
/// let mut grid = Grid::empty(size);
/// grid.paint(0, 1, Cell::rgb(0, 128, 255))?;
///
/// let record = snapshot::save(&grid)?;
/// assert_eq!(snapshot::load(&record, size), grid);
/// # Ok(())
/// # }
/// ```
pub fn save(grid: &Grid) -> Result<String> {
    Ok(serde_json::to_string(&Snapshot::capture(grid))?)
}

/// Restores a grid from a snapshot record.
///
/// Returns the stored grid if the record parses and is consistent
/// (a supported version, a non-zero size, exactly `size` rows of `size` valid cells).
/// Otherwise, a warning is logged and an empty grid of `default_size` is returned.
#[must_use]
pub fn load(record: &str, default_size: GridSize) -> Grid {
    let grid = serde_json::from_str::<Snapshot>(record)
        .map_err(|e| e.to_string())
        .and_then(Snapshot::into_grid);

    match grid {
        Ok(grid) => {
            log::debug!("restored {0}x{0} grid from snapshot", grid.size());
            grid
        }
        Err(reason) => {
            log::warn!("discarding corrupted snapshot: {reason}");
            Grid::empty(default_size)
        }
    }
}

/// Like [`load`], but a missing record also yields an empty grid of `default_size`.
#[must_use]
pub fn load_or_default(record: Option<&str>, default_size: GridSize) -> Grid {
    record.map_or_else(|| Grid::empty(default_size), |record| load(record, default_size))
}
