use thiserror::Error;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the projection and advice engine
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Engine configuration failed: {0}")]
    Config(#[from] ConfigError),
}

/// Structural input errors. Raised immediately, never retried.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("'{field}' is {value}, expected a value in [{min}, {max}]")]
    InvalidRange {
        field: &'static str,
        value: String,
        min: String,
        max: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Goal type '{0}' has no entry in the goal funding map")]
    UnmappedGoalType(String),

    #[error("A projection was requested but no snapshots were supplied")]
    MissingSnapshots,
}

impl Error {
    /// Shorthand for the common out-of-range rejection.
    pub(crate) fn invalid_range<V, B>(field: &'static str, value: V, min: B, max: B) -> Self
    where
        V: std::fmt::Display,
        B: std::fmt::Display,
    {
        Error::Validation(ValidationError::InvalidRange {
            field,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        })
    }
}
