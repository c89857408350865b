use std::{
    fmt::Display,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};

use crate::mower::{Mower, Position};
use crate::MowerRecord;

/// Occupancy bitmap over the (width + 1) x (length + 1) cells of a field.
/// Cells are private, callers go through occupy/vacate/is_occupied only.
pub struct OccupancyGrid {
    cells: Vec<bool>, // Is occupied?
    col_n: usize,
    row_n: usize,
}

impl Display for OccupancyGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Top row first, so the trace reads like a map with y growing upward.
        for y in (0..self.row_n).rev() {
            for x in 0..self.col_n {
                let cell_char = if self.is_occupied(&Position::new(x, y)) {
                    '*'
                } else {
                    '.'
                };
                write!(f, "{}", cell_char)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl OccupancyGrid {
    pub(crate) fn new(width: usize, length: usize) -> Self {
        Self {
            cells: vec![false; (width + 1) * (length + 1)],
            col_n: width + 1,
            row_n: length + 1,
        }
    }

    pub fn is_occupied(&self, pos: &Position) -> bool {
        self.pos_to_ind(pos).is_some_and(|ind| self.cells[ind])
    }

    pub fn occupy(&mut self, pos: &Position) {
        if let Some(ind) = self.pos_to_ind(pos) {
            self.cells[ind] = true;
        }
    }

    pub fn vacate(&mut self, pos: &Position) {
        if let Some(ind) = self.pos_to_ind(pos) {
            self.cells[ind] = false;
        }
    }

    // Positions outside the grid (possible for a mower constructed from an
    // out-of-range start line) have no cell, occupy/vacate on them is a no-op.
    fn pos_to_ind(&self, pos: &Position) -> Option<usize> {
        if pos.x < self.col_n && pos.y < self.row_n {
            Some(pos.y * self.col_n + pos.x)
        } else {
            None
        }
    }
}

pub struct Field {
    width: usize,
    length: usize,
    grid: OccupancyGrid,
    mowers: Vec<Mower>,
}

impl Field {
    pub fn new(width: usize, length: usize) -> Self {
        Self {
            width,
            length,
            grid: OccupancyGrid::new(width, length),
            mowers: Vec::new(),
        }
    }

    /// Executes the given records in order, one mower fully processed before
    /// the next is placed.
    pub fn run(&mut self, records: &[MowerRecord]) {
        for record in records {
            let name = format!("mower_{}", self.mowers.len() + 1);
            let mut mower = Mower::new(
                name,
                self.width,
                self.length,
                record.x,
                record.y,
                record.heading,
            );
            self.grid.occupy(mower.pos());
            log::info!("{} - position is: {}", mower.name(), mower);
            log::debug!("Current grid:\n{}", self.grid);
            log::info!(
                "{} - executing instructions: {}",
                mower.name(),
                record.instructions
            );
            mower.execute(&record.instructions, &mut self.grid);
            log::info!("{} - new position is: {}", mower.name(), mower);
            log::debug!("Current grid:\n{}", self.grid);
            self.mowers.push(mower);
        }
    }

    /// Mowers in insertion order, which is also the report order.
    pub fn mowers(&self) -> &[Mower] {
        &self.mowers
    }

    /// Writes one "x y heading" line per mower, truncating any prior content.
    pub fn report<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(&path).with_context(|| {
            format!(
                "Failed to create output file({}).",
                path.as_ref().display()
            )
        })?;
        let mut writer = BufWriter::new(file);
        for mower in &self.mowers {
            writeln!(writer, "{}", mower).with_context(|| {
                format!(
                    "Failed to write to output file({}).",
                    path.as_ref().display()
                )
            })?;
        }

        writer.flush().with_context(|| {
            format!(
                "Failed to write to output file({}).",
                path.as_ref().display()
            )
        })
    }
}
