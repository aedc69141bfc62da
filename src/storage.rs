use std::path::PathBuf;
use log::debug;
use serde_json::Value;
use crate::entities::Record;
use crate::error::MediaLogError;

/// A source of records. Every `read_all` is a full snapshot.
pub trait Storage {
    async fn read_all(&self) -> Result<Vec<Record>, MediaLogError>;
}

pub struct FileStorage {
    data_path: PathBuf,
}

impl FileStorage {
    pub fn new(data_path: PathBuf) -> Self {
        Self { data_path }
    }
}

impl Storage for FileStorage {
    async fn read_all(&self) -> Result<Vec<Record>, MediaLogError> {
        debug!("reading records from {}", self.data_path.display());
        let file_str = tokio::fs::read_to_string(&self.data_path).await
            .map_err(MediaLogError::DataIOError)?;
        parse_records(&file_str)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStorage {
    payload: String,
}

impl InMemoryStorage {
    pub fn new(payload: impl Into<String>) -> Self {
        Self { payload: payload.into() }
    }

    pub fn from_records(records: &[Record]) -> Result<Self, MediaLogError> {
        let payload = serde_json::to_string(records).map_err(MediaLogError::DataParseError)?;
        Ok(Self { payload })
    }
}

impl Storage for InMemoryStorage {
    async fn read_all(&self) -> Result<Vec<Record>, MediaLogError> {
        parse_records(&self.payload)
    }
}

/// Parses a JSON array of records. Individual records never fail; only the
/// document as a whole can.
pub fn parse_records(payload: &str) -> Result<Vec<Record>, MediaLogError> {
    let value: Value = serde_json::from_str(payload).map_err(MediaLogError::DataParseError)?;
    match value {
        Value::Array(items) => Ok(items.into_iter().map(Record::from).collect()),
        _ => Err(MediaLogError::DataNotAnArray),
    }
}
