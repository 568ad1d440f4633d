//! Error types for tunables.

/// Result type alias for option operations.
pub type Result<T> = std::result::Result<T, OptError>;

/// Errors produced while parsing, validating, or decoding option values.
///
/// Parse and decode errors leave the stored value unchanged; so do bounds
/// and allow-list violations. Must-parse constructors panic instead of
/// returning these, since an invalid literal default is a programmer error.
#[derive(Debug, thiserror::Error)]
pub enum OptError {
    /// Malformed textual input for the option's kind.
    #[error("{0}")]
    Parse(String),

    /// Malformed JSON handed to an unmarshal setter.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Malformed YAML handed to an unmarshal setter.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// Value below the configured lower bound.
    #[error("{value} < min{{{min}}}")]
    BelowMin {
        /// Rejected value, rendered in the kind's text form.
        value: String,
        /// Configured lower bound.
        min: String,
    },

    /// Value above the configured upper bound.
    #[error("{value} > max{{{max}}}")]
    AboveMax {
        /// Rejected value, rendered in the kind's text form.
        value: String,
        /// Configured upper bound.
        max: String,
    },

    /// Timestamp before the configured lower bound.
    #[error("too soon")]
    TooSoon,

    /// Timestamp after the configured upper bound.
    #[error("too late")]
    TooLate,

    /// Value absent from the configured allow-list.
    #[error("{value:?} invalid")]
    Invalid {
        /// The rejected value.
        value: String,
    },

    /// Structured input whose overall shape does not fit the option's kind.
    #[error("{kind} invalid")]
    Shape {
        /// Type name of the offending input.
        kind: &'static str,
    },

    /// Sequence element of the wrong type in a structured decode.
    #[error("[{index}]{{{kind}}} invalid")]
    Element {
        /// Index of the offending element.
        index: usize,
        /// Type name of the offending element.
        kind: &'static str,
    },
}

impl OptError {
    /// Wrap a kind-specific parser error.
    pub(crate) fn parse(err: impl std::fmt::Display) -> Self {
        Self::Parse(err.to_string())
    }
}
