//! The pricing table consumed by both renderers.
//!
//! Cells are display strings and are never parsed. Row 0 is the header
//! (column labels); every following row is a data row whose first cell is
//! the size or variant label and whose remaining cells are prices.

use crate::error::{Error, Result};

/// A validated, rectangular pricing table with a header row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PricingTable {
    rows: Vec<Vec<String>>,
}

impl PricingTable {
    /// Validates `rows` and builds a table.
    ///
    /// Fails with [`Error::InvalidInput`] when there are no rows, when the
    /// header has no columns, or when any row differs in length from the
    /// header.
    pub fn new<R, C>(rows: impl IntoIterator<Item = R>) -> Result<Self>
    where
        R: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        let header = rows
            .first()
            .ok_or_else(|| Error::invalid_input("pricing table has no header row"))?;
        let columns = header.len();
        if columns == 0 {
            return Err(Error::invalid_input("pricing table has zero columns"));
        }

        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns)
        {
            return Err(Error::invalid_input(format!(
                "row {index} has {} cells but the header has {columns}",
                row.len()
            )));
        }

        Ok(Self { rows })
    }

    /// Starts a builder from the header labels.
    pub fn builder<C: Into<String>>(header: impl IntoIterator<Item = C>) -> PricingTableBuilder {
        PricingTableBuilder::new(header)
    }

    /// All rows, header first.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// The header row.
    pub fn header(&self) -> &[String] {
        &self.rows[0]
    }

    /// Data rows paired with their 1-based data row number.
    pub fn data_rows(&self) -> impl Iterator<Item = (usize, &[String])> + '_ {
        self.rows[1..]
            .iter()
            .enumerate()
            .map(|(index, row)| (index + 1, row.as_slice()))
    }

    /// Number of columns shared by every row.
    pub fn column_count(&self) -> usize {
        self.rows[0].len()
    }

    /// Number of rows including the header.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of data rows.
    pub fn data_row_count(&self) -> usize {
        self.rows.len() - 1
    }
}

impl TryFrom<Vec<Vec<String>>> for PricingTable {
    type Error = Error;

    fn try_from(rows: Vec<Vec<String>>) -> Result<Self> {
        Self::new(rows)
    }
}

impl<const R: usize, const C: usize> TryFrom<[[&str; C]; R]> for PricingTable {
    type Error = Error;

    fn try_from(rows: [[&str; C]; R]) -> Result<Self> {
        Self::new(rows)
    }
}

/// Incremental builder for [`PricingTable`]; validation happens in
/// [`PricingTableBuilder::build`].
#[derive(Clone, Debug, Default)]
pub struct PricingTableBuilder {
    rows: Vec<Vec<String>>,
}

impl PricingTableBuilder {
    /// Creates a builder whose first row is `header`.
    pub fn new<C: Into<String>>(header: impl IntoIterator<Item = C>) -> Self {
        Self {
            rows: vec![header.into_iter().map(Into::into).collect()],
        }
    }

    /// Appends a data row.
    pub fn row<C: Into<String>>(mut self, cells: impl IntoIterator<Item = C>) -> Self {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    /// Validates the collected rows.
    pub fn build(self) -> Result<PricingTable> {
        PricingTable::new(self.rows)
    }
}
