//! The single fatal-error type propagated out of the core.
//!
//! Everything recoverable or informational becomes a `Diagnostic` held
//! alongside a best-effort result instead — this type is reserved for the
//! cases calls *fatal*.

/// Fatal errors propagated to the caller. Recoverable conditions (bad
/// tokens, unmatched brackets, invalid escapes, ...) never construct this
/// type; they are recorded as diagnostics instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The parser's recursion fuel was exhausted — guards against
    /// pathologically deep or adversarial input driving the recursive
    /// descent past a safe stack depth.
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    /// A stage's execution fuel was exhausted without making progress,
    /// e.g. an error-recovery loop that failed to advance.
    #[error("execution fuel exhausted")]
    ExecFuelExhausted,

    /// Malformed UTF-8 in strict mode that could not be resynchronised.
    #[error("invalid utf-8 sequence at byte {offset}")]
    InvalidUtf8 { offset: u32 },

    /// The atom table's backing arena could not grow further.
    #[error("atom table exhausted: {0}")]
    AtomTableExhausted(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_stable() {
        assert_eq!(
            Error::RecursionLimitExceeded.to_string(),
            "recursion limit exceeded"
        );
        assert_eq!(
            Error::InvalidUtf8 { offset: 7 }.to_string(),
            "invalid utf-8 sequence at byte 7"
        );
    }
}
