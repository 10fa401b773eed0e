use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SankeyError {
    #[error("Cannot read file {}: {source}", path.display())]
    FileError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error on line {line}: {message}")]
    ParseError { line: u64, message: String },

    #[error("Label '{label}' cannot be written as {dialect}: {reason}")]
    UnsupportedLabel {
        dialect: &'static str,
        label: String,
        reason: &'static str,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    File,
    Parse,
    Config,
}

impl SankeyError {
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileError {
            path: path.into(),
            source,
        }
    }

    pub fn parse(line: u64, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileError { .. } => ErrorCategory::File,
            Self::ParseError { .. } | Self::UnsupportedLabel { .. } | Self::CsvError(_) => {
                ErrorCategory::Parse
            }
            Self::SerializationError(_)
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Config,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::File => 1,
            ErrorCategory::Parse => 2,
            ErrorCategory::Config => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::FileError { .. } => "Check that the path exists and is readable",
            Self::ParseError { .. } => {
                "Every row needs a source, a target and a non-negative numeric value"
            }
            Self::UnsupportedLabel { .. } => {
                "Rename the node in the CSV or pick an --output that accepts the label"
            }
            Self::CsvError(_) => "Make sure the file is valid UTF-8 CSV with a header row",
            Self::SerializationError(_) => "Node labels could not be quoted for the output script",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the command line arguments or the color file and retry"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SankeyError>;
