use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::codec;
use crate::errors::{RevisionError, RevisionResult, RevisionSerializationError};
use crate::revision::Revision;
use crate::taxonomy::{RevisionCategory, RevisionType};

/// UTC time without a zone. Histories are ordered by it.
pub fn current_timestamp() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

/// One entry of a recipe's audit trail.
///
/// The data columns hold encoded revisions and are never parsed here; the
/// tag pair next to them says how to read them back. A record is written once
/// and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRecord {
    /// Assigned by the repository on save.
    pub revision_id: Option<i64>,
    pub recipe_id: i64,
    pub user_id: Uuid,
    pub revision_category: RevisionCategory,
    pub revision_type: RevisionType,
    /// Absent for ADD.
    pub previous_data: Option<String>,
    /// Absent for DELETE.
    pub new_data: Option<String>,
    pub change_comment: Option<String>,
    pub created_at: NaiveDateTime,
}

impl RevisionRecord {
    /// Record a validated revision on behalf of `user_id`.
    ///
    /// ADD fills `new_data`, DELETE fills `previous_data`, UPDATE carries the
    /// update in both. Invalid revisions are refused.
    pub fn for_revision(
        recipe_id: i64,
        user_id: Uuid,
        revision: &Revision,
        change_comment: Option<String>,
    ) -> RevisionResult<Self> {
        let violations = revision.violations();
        if !violations.is_empty() {
            return Err(RevisionError::Invalid(violations));
        }
        let encoded = codec::encode(revision)?;
        let (previous_data, new_data) = match revision.revision_type() {
            RevisionType::Add => (None, Some(encoded)),
            RevisionType::Delete => (Some(encoded), None),
            RevisionType::Update => (Some(encoded.clone()), Some(encoded)),
        };
        Ok(Self {
            revision_id: None,
            recipe_id,
            user_id,
            revision_category: revision.category(),
            revision_type: revision.revision_type(),
            previous_data,
            new_data,
            change_comment,
            created_at: current_timestamp(),
        })
    }

    pub fn with_revision_id(self, revision_id: i64) -> Self {
        Self {
            revision_id: Some(revision_id),
            ..self
        }
    }

    pub fn tag(&self) -> (RevisionCategory, RevisionType) {
        (self.revision_category, self.revision_type)
    }

    /// Decode `previous_data` with this record's own tag pair.
    pub fn previous_revision(&self) -> Result<Option<Revision>, RevisionSerializationError> {
        codec::decode_optional(
            self.revision_category,
            self.revision_type,
            self.previous_data.as_deref(),
        )
    }

    /// Decode `new_data` with this record's own tag pair.
    pub fn new_revision(&self) -> Result<Option<Revision>, RevisionSerializationError> {
        codec::decode_optional(
            self.revision_category,
            self.revision_type,
            self.new_data.as_deref(),
        )
    }

    /// The revision this record describes: the new state, or the removed
    /// state for a DELETE.
    pub fn revision(&self) -> Result<Option<Revision>, RevisionSerializationError> {
        match self.new_revision()? {
            Some(revision) => Ok(Some(revision)),
            None => self.previous_revision(),
        }
    }
}
