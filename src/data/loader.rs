use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{TableError, TraceTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a trace table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – comma-separated, first record is the header
/// * `.json`    – `{ "columns": [...], "data": [[...], ...] }` (`orient='split'`)
/// * `.parquet` – one numeric column per trace, field names are the headers
/// * anything else – whitespace-delimited text with a header line
pub fn load_file(path: &Path) -> Result<TraceTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        _ => load_text(path),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} rows x {} columns {:?} from {}",
        table.len(),
        table.width(),
        table.headers(),
        path.display()
    );
    if table.is_empty() {
        log::warn!("{} has a header but no data rows", path.display());
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// Whitespace-delimited text
// ---------------------------------------------------------------------------

fn load_text(path: &Path) -> Result<TraceTable> {
    let text = std::fs::read_to_string(path).context("reading data file")?;
    Ok(parse_text(&text)?)
}

/// Parse a whitespace-delimited table.
///
/// The first non-blank line holds the labels; every later non-blank line
/// must carry one number per label. Runs of spaces and tabs count as one
/// separator.
pub fn parse_text(text: &str) -> Result<TraceTable, TableError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty());

    let (header_line, header) = lines.next().ok_or(TableError::Empty)?;
    let headers: Vec<String> = header.split_whitespace().map(str::to_string).collect();
    let width = headers.len();

    let mut rows = Vec::new();
    for (line, content) in lines {
        let row = content
            .split_whitespace()
            .enumerate()
            .map(|(column, tok)| {
                tok.parse::<f64>().map_err(|_| TableError::NotANumber {
                    line,
                    column,
                    token: tok.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        if row.len() != width {
            return Err(TableError::RaggedRow {
                line,
                expected: width,
                found: row.len(),
            });
        }
        rows.push(row);
    }

    TraceTable::from_rows(headers, rows, header_line + 1)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column labels, then one numeric record per
/// sample. Fields are trimmed before parsing.
fn load_csv(path: &Path) -> Result<TraceTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(TableError::Empty.into());
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.context("reading CSV record")?;
        let line = record.position().map_or(0, |p| p.line() as usize);

        let row = record
            .iter()
            .enumerate()
            .map(|(column, tok)| {
                tok.parse::<f64>().map_err(|_| TableError::NotANumber {
                    line,
                    column,
                    token: tok.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;
        rows.push(row);
    }

    Ok(TraceTable::from_rows(headers, rows, 2)?)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// The shape written by `df.to_json(orient='split')`. The `index` key, if
/// present, is ignored.
#[derive(Debug, Deserialize)]
struct SplitFrame {
    columns: Vec<String>,
    data: Vec<Vec<Option<f64>>>,
}

fn load_json(path: &Path) -> Result<TraceTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let frame: SplitFrame = serde_json::from_str(&text)
        .context("parsing JSON (expected an object with 'columns' and 'data')")?;

    let width = frame.columns.len();
    if let Some((row, record)) = frame
        .data
        .iter()
        .enumerate()
        .find(|(_, r)| r.len() != width)
    {
        return Err(TableError::RaggedRecord {
            row,
            expected: width,
            found: record.len(),
        }
        .into());
    }

    // pandas writes NaN as null
    let rows = frame
        .data
        .into_iter()
        .map(|row| row.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
        .collect();

    Ok(TraceTable::from_rows(frame.columns, rows, 1)?)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file whose columns are the time column followed by the
/// traces. Any numeric type is accepted and widened to `f64`; nulls become
/// NaN.
fn load_parquet(path: &Path) -> Result<TraceTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;

    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];

    let reader = builder.build().context("building parquet reader")?;
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        for (i, col) in batch.columns().iter().enumerate() {
            if !col.data_type().is_numeric() {
                bail!(
                    "column '{}' has type {:?}, expected a numeric type",
                    headers[i],
                    col.data_type()
                );
            }
            let widened = cast(col, &DataType::Float64)
                .with_context(|| format!("casting column '{}' to f64", headers[i]))?;
            let values = widened
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array after cast")?;
            columns[i].extend(values.iter().map(|v| v.unwrap_or(f64::NAN)));
        }
    }

    Ok(TraceTable::from_columns(headers, columns)?)
}
