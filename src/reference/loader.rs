use super::{MetricStats, ReferenceModel};
use crate::error::{DevScoreError, DsResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// On-disk JSON layout of a reference table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceFile {
    pub version: String,
    pub metrics: BTreeMap<String, MetricStats>,
}

impl From<&ReferenceModel> for ReferenceFile {
    fn from(model: &ReferenceModel) -> Self {
        Self {
            version: model.version.clone(),
            metrics: model.rows().collect(),
        }
    }
}

impl From<ReferenceFile> for ReferenceModel {
    fn from(file: ReferenceFile) -> Self {
        let mut model = ReferenceModel::new(file.version);
        for (name, stats) in file.metrics {
            model.insert_named(name.trim(), stats);
        }
        model
    }
}

fn parse_field(record: &csv::StringRecord, idx: usize) -> Option<f64> {
    record.get(idx)?.trim().parse::<f64>().ok()
}

/// Reads `metric,mean,median,std_dev,p25,p75` rows. Rows that fail to parse
/// or violate the statistics invariants are skipped.
pub fn from_csv_reader<R: Read>(reader: R, version: &str) -> DsResult<ReferenceModel> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut model = ReferenceModel::new(version);
    let mut skipped = 0usize;

    for (line, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("Reference row {} unreadable: {}", line + 2, e);
                skipped += 1;
                continue;
            }
        };
        if record.len() < 6 {
            skipped += 1;
            continue;
        }
        let name = record[0].trim();
        let parsed = (1..=5).map(|i| parse_field(&record, i)).collect::<Option<Vec<f64>>>();
        let Some(v) = parsed else {
            warn!("Reference row {} ({}) has non-numeric fields", line + 2, name);
            skipped += 1;
            continue;
        };
        let stats = MetricStats::new(v[0], v[1], v[2], v[3], v[4]);
        if let Err(e) = stats.validate(name) {
            warn!("Reference row {} skipped: {}", line + 2, e);
            skipped += 1;
            continue;
        }
        model.insert_named(name, stats);
    }

    for name in model.extra_names() {
        warn!("Reference metric '{}' is not used by any component", name);
    }
    if model.is_empty() {
        return Err(DevScoreError::Validation(format!(
            "reference table '{}' has no usable rows",
            version
        )));
    }

    info!(
        "Loaded reference table '{}': {} metrics ({} rows skipped)",
        version,
        model.len(),
        skipped
    );
    Ok(model)
}

/// Loads a CSV table; the version label defaults to the file stem.
pub fn load_csv<P: AsRef<Path>>(path: P) -> DsResult<ReferenceModel> {
    let path = path.as_ref();
    let version = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("custom")
        .to_string();
    let file = File::open(path)?;
    from_csv_reader(file, &version)
}

pub fn load_json<P: AsRef<Path>>(path: P) -> DsResult<ReferenceModel> {
    let content = fs::read_to_string(path.as_ref())?;
    let file: ReferenceFile = serde_json::from_str(&content)?;
    let model = ReferenceModel::from(file);
    model.validate()?;
    info!(
        "Loaded reference table '{}' from {:?}: {} metrics",
        model.version,
        path.as_ref(),
        model.len()
    );
    Ok(model)
}

/// Dispatches on extension: `.json` is read as JSON, anything else as CSV.
pub fn load_reference<P: AsRef<Path>>(path: P) -> DsResult<ReferenceModel> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_csv(path),
    }
}

pub fn save_json<P: AsRef<Path>>(model: &ReferenceModel, path: P) -> DsResult<()> {
    let file = ReferenceFile::from(model);
    fs::write(path, serde_json::to_string_pretty(&file)?)?;
    Ok(())
}
