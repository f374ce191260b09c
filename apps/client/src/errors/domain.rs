//! Domain-level error type used by the card model, selection and session state.
//!
//! This error type is transport-agnostic. The session driver returns
//! `Result<T, crate::error::ClientError>` and converts from `DomainError`
//! using the provided `From<DomainError> for ClientError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation failure kinds raised by local (player-driven) operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    ParseCard,
    ParseRank,
    ParseSuit,
    CardNotInHand,
    EmptySelection,
    SessionOver,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input/user validation or rule violation; never mutates state
    Validation(ValidationKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn kind(&self) -> ValidationKind {
        match self {
            DomainError::Validation(kind, _) => *kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_detail() {
        let err = DomainError::validation(ValidationKind::ParseCard, "Parse card: Joker");
        assert_eq!(
            err.to_string(),
            "validation error ParseCard: Parse card: Joker"
        );
        assert_eq!(err.kind(), ValidationKind::ParseCard);
    }
}
