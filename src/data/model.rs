use thiserror::Error;

// ---------------------------------------------------------------------------
// TableError – shape problems found while building a table
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("no header row")]
    Empty,
    #[error("line {line}: expected {expected} values but found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("data row {row}: expected {expected} values but found {found}")]
    RaggedRecord {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}, column {column}: '{token}' is not a number")]
    NotANumber {
        line: usize,
        column: usize,
        token: String,
    },
    #[error("{headers} headers for {columns} columns")]
    HeaderMismatch { headers: usize, columns: usize },
    #[error("column '{column}' has {found} values, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },
}

// ---------------------------------------------------------------------------
// Series – one dependent column viewed against the time column
// ---------------------------------------------------------------------------

/// A borrowed view of one trace: its header label, the shared time values
/// and the column's own values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Series<'a> {
    pub label: &'a str,
    pub x: &'a [f64],
    pub y: &'a [f64],
}

// ---------------------------------------------------------------------------
// TraceTable – the complete loaded file
// ---------------------------------------------------------------------------

/// A rectangular numeric table with one label per column, stored
/// column-major. Column 0 is time in seconds, the rest are voltage traces.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceTable {
    headers: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl TraceTable {
    /// Build a table from a header row and row-major data.
    ///
    /// `first_line` is the 1-based source line of the first data row and is
    /// only used to report ragged rows.
    pub fn from_rows(
        headers: Vec<String>,
        rows: Vec<Vec<f64>>,
        first_line: usize,
    ) -> Result<Self, TableError> {
        if headers.is_empty() {
            return Err(TableError::Empty);
        }
        let width = headers.len();
        let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(rows.len()); width];

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(TableError::RaggedRow {
                    line: first_line + i,
                    expected: width,
                    found: row.len(),
                });
            }
            for (col, value) in columns.iter_mut().zip(row) {
                col.push(value);
            }
        }

        Ok(TraceTable { headers, columns })
    }

    /// Build a table directly from columns that already share one length.
    pub fn from_columns(
        headers: Vec<String>,
        columns: Vec<Vec<f64>>,
    ) -> Result<Self, TableError> {
        if headers.is_empty() {
            return Err(TableError::Empty);
        }
        if columns.len() != headers.len() {
            return Err(TableError::HeaderMismatch {
                headers: headers.len(),
                columns: columns.len(),
            });
        }
        let rows = columns[0].len();
        if let Some((label, col)) = headers.iter().zip(&columns).find(|(_, c)| c.len() != rows) {
            return Err(TableError::ColumnLength {
                column: label.clone(),
                expected: rows,
                found: col.len(),
            });
        }
        Ok(TraceTable { headers, columns })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of columns, time included.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows (samples).
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The shared x values.
    pub fn time(&self) -> &[f64] {
        &self.columns[0]
    }

    /// One [`Series`] per column after the first, in column order.
    pub fn series(&self) -> impl Iterator<Item = Series<'_>> + '_ {
        let x = self.time();
        self.headers
            .iter()
            .zip(&self.columns)
            .skip(1)
            .map(move |(label, y)| Series {
                label: label.as_str(),
                x,
                y: y.as_slice(),
            })
    }

    /// Number of dependent series.
    pub fn series_count(&self) -> usize {
        self.width() - 1
    }
}
