use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised by the fallible edges of the engine.
///
/// The per-tick simulation never fails; these only come out of configuration
/// loading and lookups made by the embedding application.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The JSON config could not be parsed.
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// A config value or API argument is out of its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),
}
