use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{
    COL_BOOSTER_CATEGORY, COL_BOOSTER_VERSION, COL_CLASS, COL_FLIGHT_NUMBER, COL_PAYLOAD,
    COL_SITE, LaunchDataset, RawRecord, Record,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the launch columns (extra columns ignored)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – same columns, string / integer / float typed
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            read_csv(file)
        }
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::debug!("{} records read from {}", dataset.len(), path.display());
    Ok(dataset)
}

fn validate_all(rows: Vec<RawRecord>) -> Result<LaunchDataset> {
    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, raw)| raw.validate(i))
        .collect::<Result<Vec<Record>, _>>()?;
    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse CSV text with a header row. The pandas index column and any other
/// unknown columns are skipped. Headers and fields are trimmed before
/// matching, so `"Launch Site "` still maps to the site column.
pub fn read_csv<R: Read>(source: R) -> Result<LaunchDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for required in [COL_SITE, COL_PAYLOAD, COL_CLASS, COL_BOOSTER_CATEGORY] {
        if !headers.iter().any(|h| h == required) {
            bail!("CSV missing '{required}' column");
        }
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(raw);
    }

    validate_all(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 0.0,
///     "class": 0, "Booster Version Category": "v1.0" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<RawRecord> = serde_json::from_str(&text).context("parsing JSON")?;
    validate_all(rows)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by pandas (`df.to_parquet()`) or by the
/// `generate_sample` binary.
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        rows.extend(batch_rows(&batch)?);
    }

    validate_all(rows)
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Option<&'a Arc<dyn Array>> {
    batch.schema().index_of(name).ok().map(|i| batch.column(i))
}

fn batch_rows(batch: &RecordBatch) -> Result<Vec<RawRecord>> {
    let site = column(batch, COL_SITE).context("Parquet file missing 'Launch Site' column")?;
    let payload = column(batch, COL_PAYLOAD).context("Parquet file missing 'Payload Mass (kg)' column")?;
    let class = column(batch, COL_CLASS).context("Parquet file missing 'class' column")?;
    let category = column(batch, COL_BOOSTER_CATEGORY)
        .context("Parquet file missing 'Booster Version Category' column")?;
    let flight = column(batch, COL_FLIGHT_NUMBER);
    let version = column(batch, COL_BOOSTER_VERSION);

    (0..batch.num_rows())
        .map(|row| -> Result<RawRecord> {
            Ok(RawRecord {
                site: extract_string(site, row)?,
                payload_mass_kg: extract_f64(payload, row)
                    .with_context(|| format!("Row {row}: failed to read '{COL_PAYLOAD}'"))?,
                class: extract_f64(class, row)
                    .with_context(|| format!("Row {row}: failed to read '{COL_CLASS}'"))?,
                booster_category: extract_string(category, row)?,
                flight_number: match flight {
                    Some(col) => extract_f64(col, row)?,
                    None => None,
                },
                booster_version: match version {
                    Some(col) => extract_string(col, row)?,
                    None => None,
                },
            })
        })
        .collect()
}

// -- Parquet / Arrow helpers --

/// Read a numeric cell as `f64`. Nulls map to `None`.
fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row)),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as f64),
        other => bail!("expected a numeric column, got {other:?}"),
    };
    value.context("unexpected array layout").map(Some)
}

/// Read a string cell. Nulls map to `None`.
fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    match col.data_type() {
        DataType::Utf8 => {
            let s = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(Some(s.value(row).to_string()))
        }
        DataType::LargeUtf8 => {
            let s = col.as_string::<i64>();
            Ok(Some(s.value(row).to_string()))
        }
        other => bail!("expected a string column, got {other:?}"),
    }
}
