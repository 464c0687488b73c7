//! CSV loading into an immutable dataset snapshot

use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{BaseRecord, CsvRecord};

/// Base records loaded once per session. Cloning shares the rows.
#[derive(Debug, Clone)]
pub struct Dataset {
    source: String,
    records: Arc<[BaseRecord]>,
}

impl Dataset {
    pub fn new(source: impl Into<String>, records: Vec<BaseRecord>) -> Self {
        Self {
            source: source.into(),
            records: records.into(),
        }
    }

    /// Parse CSV with a `Base,Country,Latitude,Longitude,Readiness` header.
    pub fn from_reader<R: Read>(reader: R, source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in reader.deserialize::<CsvRecord>() {
            let row = result?;
            // Header is line 1
            let line = records.len() as u64 + 2;
            records.push(row.to_base_record(line)?);
        }

        debug!("Parsed {} rows from {}", records.len(), source);
        Ok(Self::new(source, records))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn records(&self) -> &[BaseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load the bases CSV from disk
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    info!("Reading CSV from {:?}", path);

    let file = std::fs::File::open(path)?;
    let dataset = Dataset::from_reader(file, path.display().to_string())?;

    info!("Loaded {} base records", dataset.len());
    Ok(dataset)
}
