// Mon Aug 17 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("IO error reading {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error in {file} at line {line}, column {column}: {message}")]
    Parse {
        file: String,
        line: usize,
        column: usize,
        message: String,
    },
}

impl LoaderError {
    pub fn parse(file: &str, line: usize, column: usize, message: String) -> Self {
        LoaderError::Parse {
            file: file.to_string(),
            line,
            column,
            message,
        }
    }

    pub fn file(&self) -> &str {
        match self {
            LoaderError::Io { file, .. } => file,
            LoaderError::Parse { file, .. } => file,
        }
    }
}
