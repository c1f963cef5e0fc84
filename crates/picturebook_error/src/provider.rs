//! Provider error types and retry classification.

/// Failure conditions when calling an external generative service.
///
/// Transport failures and application-level rejections are kept apart so
/// callers can apply different backoff policies to each.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProviderErrorKind {
    /// Network-level failure: timeout, connection refused, body read error
    #[display("Transport failure: {}", _0)]
    Transport(String),
    /// Remote service answered with a non-2xx status
    #[display("HTTP {} rejection: {}", status, message)]
    Rejection {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },
    /// Response arrived but could not be understood
    #[display("Malformed response: {}", _0)]
    Malformed(String),
    /// Provider cannot be used (missing credential, disabled)
    #[display("Provider unavailable: {}", _0)]
    Unavailable(String),
}

impl ProviderErrorKind {
    /// HTTP status code, when the service produced one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ProviderErrorKind::Rejection { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this is a network-level failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, ProviderErrorKind::Transport(_))
    }

    /// Short label used for metrics and structured logs.
    pub fn class(&self) -> &'static str {
        match self {
            ProviderErrorKind::Transport(_) => "transport",
            ProviderErrorKind::Rejection { status: 429, .. } => "rate_limit",
            ProviderErrorKind::Rejection { status: 401 | 403, .. } => "auth",
            ProviderErrorKind::Rejection { status: 402, .. } => "payment",
            ProviderErrorKind::Rejection { .. } => "rejection",
            ProviderErrorKind::Malformed(_) => "malformed",
            ProviderErrorKind::Unavailable(_) => "unavailable",
        }
    }

    /// Check if this error type could succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderErrorKind::Transport(_) => true,
            ProviderErrorKind::Rejection { status, .. } => {
                matches!(*status, 408 | 429 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }

    /// Get retry strategy parameters for this error type.
    ///
    /// Returns `(max_retries, max_delay_secs)`. Rate limits get the widest
    /// delay window; gateway errors usually clear quickly.
    pub fn retry_strategy_params(&self) -> (usize, u64) {
        match self {
            ProviderErrorKind::Rejection { status, .. } => match *status {
                429 => (4, 45),
                503 => (3, 20),
                500 | 502 | 504 => (2, 6),
                408 => (3, 12),
                _ => (0, 0),
            },
            ProviderErrorKind::Transport(_) => (3, 10),
            _ => (0, 0),
        }
    }
}

/// Provider error with the provider name and source location.
///
/// # Examples
///
/// ```
/// use picturebook_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(
///     "replicate",
///     ProviderErrorKind::Rejection { status: 402, message: "insufficient credits".into() },
/// );
/// assert_eq!(err.kind.status_code(), Some(402));
/// assert!(format!("{}", err).contains("replicate"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error ({}): {} at line {} in {}", provider, kind, line, file)]
pub struct ProviderError {
    /// Name of the provider that failed
    pub provider: String,
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(provider: impl Into<String>, kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            provider: provider.into(),
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a transport failure.
    #[track_caller]
    pub fn transport(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(provider, ProviderErrorKind::Transport(message.into()))
    }

    /// Shorthand for a non-2xx rejection.
    #[track_caller]
    pub fn rejection(provider: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::new(
            provider,
            ProviderErrorKind::Rejection {
                status,
                message: message.into(),
            },
        )
    }

    /// Shorthand for an unparsable or incomplete response.
    #[track_caller]
    pub fn malformed(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(provider, ProviderErrorKind::Malformed(message.into()))
    }

    /// Shorthand for a provider that cannot be called at all.
    #[track_caller]
    pub fn unavailable(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(provider, ProviderErrorKind::Unavailable(message.into()))
    }
}

/// Result type for single provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Trait for errors that support retry logic.
///
/// The story text call retries errors classified here; image and speech
/// chains move to the next provider instead.
///
/// # Examples
///
/// ```
/// use picturebook_error::{ProviderError, RetryableError};
///
/// let err = ProviderError::rejection("freepik", 503, "Service unavailable");
/// assert!(err.is_retryable());
/// let (retries, max_delay_secs) = err.retry_strategy_params();
/// assert_eq!(retries, 3);
/// assert_eq!(max_delay_secs, 20);
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;

    /// Get retry strategy parameters for this error.
    ///
    /// Returns `(max_retries, max_delay_secs)`.
    fn retry_strategy_params(&self) -> (usize, u64) {
        (3, 10)
    }
}

impl RetryableError for ProviderError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    fn retry_strategy_params(&self) -> (usize, u64) {
        self.kind.retry_strategy_params()
    }
}
