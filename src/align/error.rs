//! Error types for alignment operations

use thiserror::Error;

/// Errors that can occur while aligning or distributing elements
///
/// Resolution, cardinality, spacing, callback and overflow errors are raised
/// before any element is moved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlignError {
    /// Selector or handle matched nothing
    #[error("element not found: {selector}")]
    Resolution { selector: String },

    /// Fewer elements than the operation needs
    #[error("expected at least {required} elements, found {found}")]
    Cardinality { required: usize, found: usize },

    /// Spacing value does not parse as an integer
    #[error("spacing must be an integer, got '{value}'")]
    InvalidSpacing { value: String },

    /// A completion value was supplied that cannot be called
    #[error("completion handler must be callable, got {found}")]
    CallbackType { found: String },

    /// A target coordinate does not fit in `i64`
    #[error("coordinate overflow while computing {context}")]
    Overflow { context: String },

    /// Element handle no longer refers to a live element
    #[error("stale element handle: {handle}")]
    StaleHandle { handle: String },
}

impl AlignError {
    /// Create a resolution error
    pub fn not_found(selector: impl Into<String>) -> Self {
        Self::Resolution {
            selector: selector.into(),
        }
    }

    /// Create a cardinality error
    pub fn cardinality(required: usize, found: usize) -> Self {
        Self::Cardinality { required, found }
    }

    /// Create an invalid spacing error
    pub fn invalid_spacing(value: impl Into<String>) -> Self {
        Self::InvalidSpacing {
            value: value.into(),
        }
    }

    /// Create a callback type error
    pub fn callback_type(found: impl Into<String>) -> Self {
        Self::CallbackType {
            found: found.into(),
        }
    }

    /// Create a stale handle error
    pub fn stale(handle: impl std::fmt::Debug) -> Self {
        Self::StaleHandle {
            handle: format!("{:?}", handle),
        }
    }

    pub fn overflow(context: impl Into<String>) -> Self {
        Self::Overflow {
            context: context.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinality_display() {
        let err = AlignError::cardinality(2, 1);
        assert_eq!(err.to_string(), "expected at least 2 elements, found 1");
    }

    #[test]
    fn test_invalid_spacing_display() {
        let err = AlignError::invalid_spacing("wide");
        assert!(err.to_string().contains("'wide'"));
    }

    #[test]
    fn test_overflow_display() {
        let err = AlignError::overflow("distribution offset");
        assert_eq!(
            err.to_string(),
            "coordinate overflow while computing distribution offset"
        );
    }
}
