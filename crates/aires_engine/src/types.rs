use std::fmt;
use std::path::PathBuf;

pub type RequestId = u64;
pub type ResumeId = i64;

/// Classification returned by the validation endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub is_resume: bool,
    pub confidence: f64,
    pub top_label: Option<String>,
}

/// Resume record stored by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredResume {
    pub id: ResumeId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Validated {
        request_id: RequestId,
        result: Result<ValidationReport, ApiError>,
    },
    Uploaded {
        request_id: RequestId,
        result: Result<StoredResume, ApiError>,
    },
    Rewritten {
        request_id: RequestId,
        result: Result<String, ApiError>,
    },
    Revised {
        request_id: RequestId,
        result: Result<String, ApiError>,
    },
    PdfSaved {
        request_id: RequestId,
        result: Result<PathBuf, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
    /// `error` field of the response body, when the server sent one.
    pub server_message: Option<String>,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            server_message: None,
        }
    }

    pub(crate) fn rejected(status: u16, server_message: Option<String>) -> Self {
        Self {
            kind: FailureKind::HttpStatus(status),
            message: format!("server responded with status {status}"),
            server_message,
        }
    }

    /// True when no response was received at all.
    pub fn is_network(&self) -> bool {
        self.kind.is_network()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Network,
    Timeout,
    HttpStatus(u16),
    Decode,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Io,
}

impl FailureKind {
    pub fn is_network(&self) -> bool {
        matches!(self, FailureKind::Network | FailureKind::Timeout)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Decode => write!(f, "undecodable response"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Io => write!(f, "io error"),
        }
    }
}
