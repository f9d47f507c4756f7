//! Error types for RiskWatch

/// Result type alias using RiskWatch's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for RiskWatch operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Classification errors (transport or reply contract)
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Failure reaching the classifier oracle.
///
/// The pipeline never retries on these; retry policy belongs to whoever owns
/// the transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("request rejected: {0}")]
    Unauthorized(String),

    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected status {status}: {message}")]
    Status { status: u16, message: String },

    /// Response envelope could not be read
    #[error("unexpected response envelope: {0}")]
    Protocol(String),

    #[error("classifier returned no text")]
    EmptyResponse,
}

impl TransportError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }
}

/// The oracle answered, but the reply violates the expected contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Payload is not a single JSON object
    #[error("malformed classifier reply: {0}")]
    Malformed(String),

    /// A required field is absent
    #[error("classifier reply is missing field `{0}`")]
    MissingField(&'static str),

    /// A field is present with the wrong type or an unknown value
    #[error("classifier reply has invalid value for `{0}`")]
    InvalidType(&'static str),

    /// A numeric field is outside its allowed range; `value` is the number
    /// as it appeared in the reply
    #[error("classifier reply field `{field}` out of range: {value}")]
    OutOfRange { field: &'static str, value: String },
}

impl ParseError {
    /// Name of the offending field, if the error concerns one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Malformed(_) => None,
            Self::MissingField(field) | Self::InvalidType(field) => Some(field),
            Self::OutOfRange { field, .. } => Some(field),
        }
    }
}

/// Why a classification attempt produced no verdict.
///
/// Kept as two variants so callers can tell "service down" apart from
/// "service returned garbage". Neither is ever turned into a safe verdict.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    #[error("classifier unavailable: {0}")]
    Transport(#[from] TransportError),

    #[error("classifier reply rejected: {0}")]
    Parse(#[from] ParseError),
}

impl ClassifyError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Message suitable for showing to an end user
    pub fn user_message(&self) -> String {
        let cause = match self {
            Self::Transport(e) => e.to_string(),
            Self::Parse(e) => e.to_string(),
        };
        format!("Failed to classify text: {}", cause)
    }
}
