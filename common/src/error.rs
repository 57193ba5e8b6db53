use thiserror::Error;

/// The given input could not be understood as an IPv4 CIDR block.
///
/// This is the only error that escapes the sweep engine. Everything that can
/// go wrong per host once a sweep is running (probe timeouts, refused
/// connections, failed reverse lookups) is folded into the results instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid network range '{input}': {reason}")]
pub struct InvalidRangeError {
    pub input: String,
    pub reason: String,
}

impl InvalidRangeError {
    pub fn new(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
