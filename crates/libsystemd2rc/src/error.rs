//! Error types for libsystemd2rc.

/// Result type alias for conversions.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// A unit that is structurally unfit for conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The unit has no `[Service]` section.
    #[error("no [Service] section found")]
    MissingServiceSection,

    /// The unit uses a directive that has no OpenRC counterpart.
    #[error("{directive}= is not supported by OpenRC")]
    UnsupportedDirective { directive: String },
}

/// A malformed `Environment=` value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvironmentError {
    /// Quotes in the value are not balanced.
    #[error("unbalanced quotes in environment list: {raw}")]
    UnbalancedQuotes { raw: String },

    /// A token is not of the form `NAME=VALUE`.
    #[error("environment entry '{token}' is missing '='")]
    MissingEquals { token: String },
}

/// Any failure while turning a unit into a script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A directive required by the declared service type is absent or empty.
    #[error("[{section}] {key}= is required but missing")]
    MissingDirective { section: String, key: String },

    #[error("invalid {directive}= value: {source}")]
    Environment {
        directive: String,
        #[source]
        source: EnvironmentError,
    },
}

impl ConvertError {
    pub(crate) fn missing(section: &str, key: &str) -> Self {
        Self::MissingDirective {
            section: section.to_owned(),
            key: key.to_owned(),
        }
    }
}
