//! Error types for the homework bot.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request to {endpoint} with from_date={from_date} failed")]
    ApiTransport {
        endpoint: String,
        from_date: i64,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected response status {status} from {endpoint} with from_date={from_date}")]
    ApiStatus {
        status: u16,
        endpoint: String,
        from_date: i64,
    },

    #[error("Undecodable response body from {endpoint} with from_date={from_date}")]
    ApiBody {
        endpoint: String,
        from_date: i64,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid API response")]
    Validation(#[from] ValidationError),

    #[error("Invalid homework record")]
    Format(#[from] FormatError),

    #[error("Message was not delivered: {0}")]
    DeliverySuppressed(String),
}

impl Error {
    /// True for transport, status and body failures of the homework API.
    pub fn is_api(&self) -> bool {
        matches!(
            self,
            Error::ApiTransport { .. } | Error::ApiStatus { .. } | Error::ApiBody { .. }
        )
    }
}

/// Whether a malformed response is missing something or has it in the wrong shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    Key,
    Type,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("response has no key \"{0}\"")]
    MissingKey(&'static str),

    #[error("unexpected type of \"{key}\": expected {expected}")]
    WrongType {
        key: &'static str,
        expected: &'static str,
    },
}

impl ValidationError {
    pub fn kind(&self) -> ValidationKind {
        match self {
            ValidationError::MissingKey(_) => ValidationKind::Key,
            ValidationError::NotAnObject | ValidationError::WrongType { .. } => ValidationKind::Type,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("homework is not a JSON object")]
    NotAnObject,

    #[error("homework has no key \"homework_name\"")]
    MissingName,

    #[error("received status {0:?} is not a known verdict")]
    UnknownStatus(Option<String>),
}

/// Render an error followed by each of its causes, separated by `: `.
pub fn render_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut cause = error.source();
    while let Some(inner) = cause {
        rendered.push_str(": ");
        rendered.push_str(&inner.to_string());
        cause = inner.source();
    }
    rendered
}
