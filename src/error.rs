use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediaLogError {
    #[error("Failed to read data file: {0}")]
    DataIOError(std::io::Error),
    #[error("Failed to parse data file: {0}")]
    DataParseError(serde_json::Error),
    #[error("Data file is not a JSON array")]
    DataNotAnArray,
    #[error("Invalid month: {0} (expected 1-12 or 'all')")]
    InvalidMonth(String),
    #[error("Failed to read/write config file: {0}")]
    ConfigIOError(std::io::Error),
    #[error("Failed to serialize/deserialize config: {0}")]
    ConfigSerializationError(serde_json::Error),
    #[error("Invalid collation locale: {0}")]
    InvalidLocale(String),
    #[error("Home directory not found")]
    HomeDirNotFound,
}

impl MediaLogError {
    /// Message shown to the user when the catalog cannot be displayed.
    pub fn user_message(&self) -> String {
        match self {
            MediaLogError::DataIOError(_) => format!("{}. Check that the data file exists and is readable.", self),
            MediaLogError::DataParseError(_) | MediaLogError::DataNotAnArray => {
                format!("{}. Check that the file contains a JSON array of records.", self)
            }
            _ => self.to_string(),
        }
    }
}
