//! Fixed-capacity sparse Jacobian in triplet form
//!
//! Rows index constraint (or position) outputs, columns index the entries
//! of one variable set. Only explicitly written entries are stored; every
//! other coefficient reads as zero.

use heapless::Vec;

use crate::error::Error;

/// Maximum stored entries per Jacobian block
pub const MAX_JACOBIAN_ENTRIES: usize = 256;

/// One stored coefficient
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Entry {
    pub row: usize,
    pub col: usize,
    pub value: f64,
}

/// Sparse matrix block with a fixed shape
#[derive(Debug, Clone, PartialEq)]
pub struct Jacobian {
    rows: usize,
    cols: usize,
    entries: Vec<Entry, MAX_JACOBIAN_ENTRIES>,
}

impl Jacobian {
    /// Create an empty block of the given shape
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            entries: Vec::new(),
        }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Write a coefficient, replacing any value already stored there
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), Error> {
        if row >= self.rows {
            return Err(Error::OutOfRange {
                index: row,
                count: self.rows,
            });
        }
        if col >= self.cols {
            return Err(Error::OutOfRange {
                index: col,
                count: self.cols,
            });
        }

        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.row == row && e.col == col)
        {
            entry.value = value;
            return Ok(());
        }

        self.entries
            .push(Entry { row, col, value })
            .map_err(|_| Error::CapacityExceeded)
    }

    /// Read a coefficient (zero when not stored)
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.entries
            .iter()
            .find(|e| e.row == row && e.col == col)
            .map_or(0.0, |e| e.value)
    }

    /// Stored entries in insertion order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of stored entries whose value is not zero
    pub fn nonzeros(&self) -> usize {
        self.entries.iter().filter(|e| e.value != 0.0).count()
    }

    /// Iterate the stored `(col, value)` pairs of one row
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.row == row)
            .map(|e| (e.col, e.value))
    }

    /// Drop all stored entries, keeping the shape
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
