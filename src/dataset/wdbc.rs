//! Loaders for the Wisconsin Diagnostic Breast Cancer data

use super::{Dataset, FEATURE_NAMES, N_FEATURES};
use crate::error::{ClassifierError, Result};
use ndarray::{Array1, Array2};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Layout of a WDBC file on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WdbcFormat {
    /// UCI `wdbc.data`: no header, `id,diagnosis,<30 values>`
    Uci,
    /// Header row, 30 feature columns and one `diagnosis` or `target` column
    Headered,
}

/// How a label column encodes the diagnosis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelEncoding {
    /// `diagnosis`: `M` or `B`
    Diagnosis,
    /// scikit-learn `target`: `0` malignant, `1` benign
    SklearnTarget,
}

impl LabelEncoding {
    fn from_header(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "diagnosis" => Some(LabelEncoding::Diagnosis),
            "target" => Some(LabelEncoding::SklearnTarget),
            _ => None,
        }
    }
}

/// Load a WDBC file, detecting its layout from the first record.
pub fn load_wdbc(path: impl AsRef<Path>) -> Result<(Dataset, WdbcFormat)> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| {
        ClassifierError::DataError(format!("cannot open {}: {}", path.display(), e))
    })?;
    parse_wdbc(file)
}

/// Parse WDBC records from any reader.
pub fn parse_wdbc<R: Read>(reader: R) -> Result<(Dataset, WdbcFormat)> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let records = rdr.records().collect::<std::result::Result<Vec<_>, _>>()?;
    let first = records
        .first()
        .ok_or_else(|| ClassifierError::DataError("empty dataset file".to_string()))?;

    let is_uci = first.len() == N_FEATURES + 2
        && matches!(first.get(1), Some("M") | Some("B"));

    if is_uci {
        let dataset = parse_uci(&records)?;
        Ok((dataset, WdbcFormat::Uci))
    } else {
        let dataset = parse_headered(&records)?;
        Ok((dataset, WdbcFormat::Headered))
    }
}

fn parse_uci(records: &[csv::StringRecord]) -> Result<Dataset> {
    let mut values = Vec::with_capacity(records.len() * N_FEATURES);
    let mut labels = Vec::with_capacity(records.len());

    for (line, record) in records.iter().enumerate() {
        if record.len() != N_FEATURES + 2 {
            return Err(ClassifierError::DataError(format!(
                "line {}: expected {} fields, found {}",
                line + 1,
                N_FEATURES + 2,
                record.len()
            )));
        }
        labels.push(parse_label(&record[1], LabelEncoding::Diagnosis, line)?);
        for field in record.iter().skip(2) {
            values.push(parse_value(field, line)?);
        }
    }

    let names = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
    build(values, labels, names)
}

fn parse_headered(records: &[csv::StringRecord]) -> Result<Dataset> {
    let header = &records[0];
    let (label_col, encoding) = header
        .iter()
        .enumerate()
        .find_map(|(i, h)| LabelEncoding::from_header(h).map(|enc| (i, enc)))
        .ok_or_else(|| {
            ClassifierError::DataError("missing 'diagnosis' or 'target' column".to_string())
        })?;
    debug!(column = &header[label_col], ?encoding, "Label column selected");

    // An `id` column, when present, is not a feature.
    let feature_cols: Vec<usize> = (0..header.len())
        .filter(|&i| i != label_col && !header[i].eq_ignore_ascii_case("id"))
        .collect();
    if feature_cols.len() != N_FEATURES {
        return Err(ClassifierError::DataError(format!(
            "expected {} feature columns, found {}",
            N_FEATURES,
            feature_cols.len()
        )));
    }
    let names: Vec<String> = feature_cols.iter().map(|&i| header[i].to_string()).collect();

    let body = &records[1..];
    let mut values = Vec::with_capacity(body.len() * N_FEATURES);
    let mut labels = Vec::with_capacity(body.len());

    for (offset, record) in body.iter().enumerate() {
        let line = offset + 1;
        if record.len() != header.len() {
            return Err(ClassifierError::DataError(format!(
                "line {}: expected {} fields, found {}",
                line + 1,
                header.len(),
                record.len()
            )));
        }
        labels.push(parse_label(&record[label_col], encoding, line)?);
        for &col in &feature_cols {
            values.push(parse_value(&record[col], line)?);
        }
    }

    build(values, labels, names)
}

/// Class 1 is malignant, class 0 benign, whatever the source encoding.
fn parse_label(field: &str, encoding: LabelEncoding, line: usize) -> Result<f64> {
    match (encoding, field) {
        (_, "M" | "m") => Ok(1.0),
        (_, "B" | "b") => Ok(0.0),
        (LabelEncoding::SklearnTarget, "0") => Ok(1.0),
        (LabelEncoding::SklearnTarget, "1") => Ok(0.0),
        (_, other) => Err(ClassifierError::DataError(format!(
            "line {}: unknown diagnosis '{}'",
            line + 1,
            other
        ))),
    }
}

fn parse_value(field: &str, line: usize) -> Result<f64> {
    field.parse::<f64>().map_err(|_| {
        ClassifierError::DataError(format!("line {}: invalid number '{}'", line + 1, field))
    })
}

fn build(values: Vec<f64>, labels: Vec<f64>, names: Vec<String>) -> Result<Dataset> {
    let n_samples = labels.len();
    if n_samples == 0 {
        return Err(ClassifierError::DataError("dataset has no samples".to_string()));
    }
    debug!(n_samples, "Parsed WDBC records");
    let x = Array2::from_shape_vec((n_samples, N_FEATURES), values)?;
    Dataset::new(x, Array1::from_vec(labels), names)
}
