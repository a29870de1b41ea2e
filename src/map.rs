//! The occupancy grid built up from radar detections.

use crate::error::{is_positive, ConfigError};
use crate::math::{project_along, Point2d};
use crate::radar::Detection;
use crate::vehicle::Pose;
use itertools::iproduct;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The largest number of cells a grid may hold.
pub const MAX_CELLS: usize = 1 << 24;

/// The attributes of an occupancy grid.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridAttributes {
    /// The width of one square cell, in world units.
    pub resolution: f64,
    /// The confidence added to a cell each time a detection lands in it.
    pub increment: f64,
    /// The confidence at which cells saturate.
    pub max_confidence: f64,
}

impl Default for GridAttributes {
    fn default() -> Self {
        Self {
            resolution: 5.0,
            increment: 0.2,
            max_confidence: 1.0,
        }
    }
}

/// A grid over the world accumulating confidence that each cell is occupied.
///
/// Cells are indexed by `(row, col)`, where row 0 is the top of the world.
/// Confidence only ever rises until [OccupancyGrid::reset] is called.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    attribs: GridAttributes,
    rows: usize,
    cols: usize,
    /// Cell confidences in row-major order.
    cells: Vec<f64>,
}

impl OccupancyGrid {
    /// Creates an empty grid covering a world of the given size.
    pub fn new(
        world_width: f64,
        world_height: f64,
        attribs: &GridAttributes,
    ) -> Result<Self, ConfigError> {
        let GridAttributes {
            resolution,
            increment,
            max_confidence,
        } = *attribs;
        if !is_positive(resolution) {
            return Err(ConfigError::InvalidResolution(resolution));
        }
        if !is_positive(max_confidence) || max_confidence > 1.0 {
            return Err(ConfigError::InvalidMaxConfidence(max_confidence));
        }
        if !is_positive(increment) || increment > max_confidence {
            return Err(ConfigError::InvalidIncrement {
                increment,
                max_confidence,
            });
        }

        let rows = (world_height / resolution).floor();
        let cols = (world_width / resolution).floor();
        if !(rows >= 1.0 && cols >= 1.0 && rows.is_finite() && cols.is_finite()) {
            return Err(ConfigError::EmptyGrid {
                width: world_width,
                height: world_height,
                resolution,
            });
        }
        if rows * cols > MAX_CELLS as f64 {
            return Err(ConfigError::GridTooLarge {
                rows,
                cols,
                max_cells: MAX_CELLS,
            });
        }
        let (rows, cols) = (rows as usize, cols as usize);

        Ok(Self {
            attribs: *attribs,
            rows,
            cols,
            cells: vec![0.0; rows * cols],
        })
    }

    /// The grid's attributes.
    pub fn attributes(&self) -> &GridAttributes {
        &self.attribs
    }

    /// The width of one cell, in world units.
    pub fn resolution(&self) -> f64 {
        self.attribs.resolution
    }

    /// The number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Finds the cell containing a world space point, if it lies on the grid.
    pub fn cell_of(&self, point: Point2d) -> Option<(usize, usize)> {
        let row = (point.y / self.attribs.resolution).floor();
        let col = (point.x / self.attribs.resolution).floor();
        let on_grid = row >= 0.0 && col >= 0.0 && row < self.rows as f64 && col < self.cols as f64;
        on_grid.then(|| (row as usize, col as usize))
    }

    /// Gets the confidence of a cell, or `None` if it is off the grid.
    pub fn confidence(&self, row: usize, col: usize) -> Option<f64> {
        (row < self.rows && col < self.cols).then(|| self.cells[row * self.cols + col])
    }

    /// Accumulates the detections of one scan taken from `pose`.
    ///
    /// Each detection raises the confidence of the cell it lands in by the
    /// grid's increment, up to the maximum confidence. Detections landing
    /// off the grid are ignored. Repeated hits on a cell within one call all count.
    pub fn update(&mut self, pose: &Pose, detections: &[Detection]) {
        for det in detections {
            let angle = pose.heading + det.relative_angle;
            let point = project_along(pose.position, angle, det.distance);
            if let Some((row, col)) = self.cell_of(point) {
                let cell = &mut self.cells[row * self.cols + col];
                *cell = f64::min(*cell + self.attribs.increment, self.attribs.max_confidence);
            }
        }
    }

    /// Forgets everything, returning every cell to zero confidence.
    pub fn reset(&mut self) {
        self.cells.fill(0.0);
    }

    /// Returns an iterator over the cells with non-zero confidence,
    /// as `(row, col, confidence)` in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        iproduct!(0..self.rows, 0..self.cols)
            .map(move |(row, col)| (row, col, self.cells[row * self.cols + col]))
            .filter(|(_, _, confidence)| *confidence > 0.0)
    }

    /// Renders the grid as greyscale rows, one byte per cell.
    /// Unknown cells are white (255) and fully confident cells are black (0).
    pub fn render_snapshot(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.cols)
            .map(|row| {
                row.iter()
                    .map(|confidence| (255.0 * (1.0 - confidence)) as u8)
                    .collect()
            })
            .collect()
    }
}
