#[derive(Debug)]
pub enum LoadModelError {
    InvalidParameter { field: &'static str, reason: String },
    // Individually valid fields whose combination overflows the load columns
    NonFiniteLoad { quantity: &'static str },
    IoError(std::io::Error),
    CsvError(csv::Error),
    JsonError(serde_json::Error),
    XlsxError(rust_xlsxwriter::XlsxError),
}

impl LoadModelError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        LoadModelError::InvalidParameter { field, reason: reason.into() }
    }
}

impl From<std::io::Error> for LoadModelError {
    fn from(err: std::io::Error) -> Self {
        LoadModelError::IoError(err)
    }
}

impl From<csv::Error> for LoadModelError {
    fn from(err: csv::Error) -> Self {
        LoadModelError::CsvError(err)
    }
}

impl From<serde_json::Error> for LoadModelError {
    fn from(err: serde_json::Error) -> Self {
        LoadModelError::JsonError(err)
    }
}

impl From<rust_xlsxwriter::XlsxError> for LoadModelError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        LoadModelError::XlsxError(err)
    }
}

impl std::fmt::Display for LoadModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadModelError::InvalidParameter { field, reason } => {
                write!(f, "Invalid parameter `{}`: {}", field, reason)
            }
            LoadModelError::NonFiniteLoad { quantity } => {
                write!(f, "Parameter combination produces a non-finite {}", quantity)
            }
            LoadModelError::IoError(e) => write!(f, "IO error: {}", e),
            LoadModelError::CsvError(e) => write!(f, "CSV error: {}", e),
            LoadModelError::JsonError(e) => write!(f, "JSON error: {}", e),
            LoadModelError::XlsxError(e) => write!(f, "XLSX error: {}", e),
        }
    }
}

impl std::error::Error for LoadModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadModelError::InvalidParameter { .. } | LoadModelError::NonFiniteLoad { .. } => None,
            LoadModelError::IoError(e) => Some(e),
            LoadModelError::CsvError(e) => Some(e),
            LoadModelError::JsonError(e) => Some(e),
            LoadModelError::XlsxError(e) => Some(e),
        }
    }
}
