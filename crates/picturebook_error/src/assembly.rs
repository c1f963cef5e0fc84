//! Storybook assembly error types.

/// Kinds of document assembly failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AssemblyErrorKind {
    /// An image could not be read or decoded for embedding
    #[display("Image could not be embedded: {}", _0)]
    Image(String),
    /// The PDF writer failed
    #[display("PDF rendering failed: {}", _0)]
    Render(String),
    /// Page numbers in the story are not a usable ordering
    #[display("Invalid page ordering: {}", _0)]
    Ordering(String),
}

/// Assembly error with location tracking.
///
/// Assembly failures are logged by the pipeline and leave the run's
/// `pdf_path` empty; they never fail a run.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Assembly Error: {} at line {} in {}", kind, line, file)]
pub struct AssemblyError {
    /// The kind of error that occurred
    pub kind: AssemblyErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AssemblyError {
    /// Create a new assembly error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AssemblyErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
