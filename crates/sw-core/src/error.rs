use std::path::PathBuf;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building geometry or loading tuning values.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The plane must have positive, finite dimensions.
    #[error("invalid bounds {width}x{height}: dimensions must be positive and finite")]
    InvalidBounds {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },

    /// A tuning value is out of its accepted range.
    #[error("invalid tuning value for {field}: {reason}")]
    InvalidTuning {
        /// Dotted path of the offending field, e.g. `motion.max_speed`.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The tuning TOML could not be parsed.
    #[error("failed to parse tuning: {0}")]
    TuningParse(#[from] toml::de::Error),

    /// The tuning could not be rendered as TOML.
    #[error("failed to serialize tuning: {0}")]
    TuningSerialize(#[from] toml::ser::Error),

    /// The tuning file could not be read.
    #[error("failed to read tuning file {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
