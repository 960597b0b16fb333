use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::any::AnyDataContainer;
use super::arrow_container::ArrowDataContainer;
use super::container::DataContainer;
use super::row_container::RowDataContainer;
use super::value::CellValue;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a base container from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` / `.pq` – read as Arrow batches into an [`ArrowDataContainer`]
/// * `.json`            – `[{ "col": value, ... }, ...]` into a [`RowDataContainer`]
/// * `.csv`             – header row plus records into a [`RowDataContainer`]
pub fn load_file(path: &Path) -> Result<AnyDataContainer> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let container: AnyDataContainer = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path)?.into(),
        "json" => load_json(path)?.into(),
        "csv" => load_csv(path)?.into(),
        other => bail!("Unsupported file extension: .{other}"),
    };
    log::info!(
        "Loaded {} rows × {} columns from {}",
        container.num_rows(),
        container.num_columns(),
        path.display()
    );
    Ok(container)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "sample": "A", "concentration": 1.5 },
///   { "sample": "B", "concentration": 0.5, "operator": "Bob" }
/// ]
/// ```
///
/// Columns are the union of all keys, sorted by name. Keys missing from a
/// record read as `Null`.
fn load_json(path: &Path) -> Result<RowDataContainer> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let objects = records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            rec.as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))
        })
        .collect::<Result<Vec<_>>>()?;

    let fields: Vec<String> = objects
        .iter()
        .flat_map(|obj| obj.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut rows = Vec::with_capacity(objects.len());
    let mut missing = 0usize;
    for obj in &objects {
        let row: Vec<CellValue> = fields
            .iter()
            .map(|field| match obj.get(field) {
                Some(val) => json_to_cell(val),
                None => {
                    missing += 1;
                    CellValue::Null
                }
            })
            .collect();
        rows.push(row);
    }
    if missing > 0 {
        log::warn!("{missing} JSON cells were missing and read as null");
    }

    RowDataContainer::new(fields, rows).context("building container from JSON")
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then one record per row.
/// Cells are typed with [`CellValue::guess`].
fn load_csv(path: &Path) -> Result<RowDataContainer> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let fields: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(CellValue::guess).collect());
    }

    RowDataContainer::new(fields, rows).context("building container from CSV")
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load every record batch of a Parquet file into one columnar container.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<ArrowDataContainer> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let schema = builder.schema().clone();
    let reader = builder.build().context("building parquet reader")?;

    let batches = reader
        .collect::<Result<Vec<_>, _>>()
        .context("reading parquet record batch")?;
    log::debug!("read {} parquet record batches", batches.len());

    ArrowDataContainer::from_batches(schema, &batches).context("concatenating parquet batches")
}
