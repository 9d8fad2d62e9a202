//! Error types for the shaping and reordering pipeline.

use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can abort a pipeline invocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Conflicting or unsupported option combination.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Structurally invalid code unit sequence.
    #[error("malformed input: unpaired surrogate at code unit {index}")]
    MalformedInput { index: usize },

    /// Output buffer smaller than the measured requirement.
    #[error("output buffer too small: {required} code points required, {available} available")]
    Capacity { required: usize, available: usize },

    /// Explicit embedding/isolate nesting went past the maximum depth.
    ///
    /// Only returned when strict nesting is requested; otherwise the
    /// excess formatting characters are ignored and the event is logged.
    #[error("explicit nesting exceeds depth {max_depth} at index {index}")]
    NestingOverflow { index: usize, max_depth: u8 },
}

impl Error {
    pub(crate) fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    pub(crate) fn check_capacity(required: usize, available: usize) -> Result<()> {
        if available < required {
            Err(Error::Capacity {
                required,
                available,
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_check_accepts_exact_and_larger_buffers() {
        assert!(Error::check_capacity(4, 4).is_ok());
        assert!(Error::check_capacity(4, 9).is_ok());
        assert_eq!(
            Error::check_capacity(4, 3),
            Err(Error::Capacity {
                required: 4,
                available: 3
            })
        );
    }

    #[test]
    fn messages_name_the_failure() {
        let err = Error::MalformedInput { index: 7 };
        assert_eq!(
            err.to_string(),
            "malformed input: unpaired surrogate at code unit 7"
        );
    }
}
