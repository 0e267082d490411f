use std::fmt;

use itertools::Itertools;

use crate::taxonomy::{RevisionCategory, RevisionType};

pub type RevisionResult<T> = std::result::Result<T, RevisionError>;

/// Why a revision draft is not valid. Reported by [`crate::Revision::violations`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Violation {
    /// The wire name of the offending field, e.g. `ingredientName`.
    pub field: &'static str,
    pub rule: Rule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Missing,
    Blank,
    NotPositive,
    BelowOne,
    Unchanged,
}

impl Violation {
    pub(crate) fn new(field: &'static str, rule: Rule) -> Self {
        Self { field, rule }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rule {
            Rule::Missing => write!(f, "{} is required", self.field),
            Rule::Blank => write!(f, "{} must not be blank", self.field),
            Rule::NotPositive => write!(f, "{} must be greater than zero", self.field),
            Rule::BelowOne => write!(f, "{} must be at least 1", self.field),
            Rule::Unchanged => write!(f, "{} must differ from previousValue", self.field),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RevisionError {
    #[error("Invalid revision: {}", .0.iter().join(", "))]
    Invalid(Vec<Violation>),
    #[error("{field} does not belong to a {category} {revision_type} revision")]
    ForeignField {
        category: RevisionCategory,
        revision_type: RevisionType,
        field: &'static str,
    },
    #[error(transparent)]
    Serialization(#[from] RevisionSerializationError),
}

/// A revision blob could not be converted. Carries the tag pair and text involved.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("Failed to convert {category} {revision_type} revision: {kind}")]
pub struct RevisionSerializationError {
    pub category: RevisionCategory,
    pub revision_type: RevisionType,
    pub text: String,
    pub kind: SerializationErrorKind,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SerializationErrorKind {
    #[error("not valid JSON: {0}")]
    Malformed(String),
    #[error("expected a JSON object")]
    NotAnObject,
    #[error("missing required field {0}")]
    MissingField(&'static str),
    #[error("embedded {field} is {found}, expected {expected}")]
    TagMismatch {
        field: &'static str,
        expected: &'static str,
        found: String,
    },
    #[error("bad payload: {0}")]
    InvalidPayload(String),
    #[error("could not encode: {0}")]
    Encode(String),
}

impl RevisionSerializationError {
    pub(crate) fn new(
        category: RevisionCategory,
        revision_type: RevisionType,
        text: &str,
        kind: SerializationErrorKind,
    ) -> Self {
        Self {
            category,
            revision_type,
            text: text.to_string(),
            kind,
        }
    }
}
