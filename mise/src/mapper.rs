//! Read-model projection of [`RevisionRecord`] for API consumers.
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::record::RevisionRecord;
use crate::taxonomy::{RevisionCategory, RevisionType};

/// What clients see of a revision record. The data blobs are passed through
/// unparsed; decode them with [`crate::codec::decode`] and the record's own tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionDto {
    pub revision_id: Option<i64>,
    pub recipe_id: i64,
    pub user_id: Uuid,
    pub revision_category: RevisionCategory,
    pub revision_type: RevisionType,
    pub previous_data: Option<String>,
    pub new_data: Option<String>,
    pub change_comment: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<&RevisionRecord> for RevisionDto {
    fn from(record: &RevisionRecord) -> Self {
        Self {
            revision_id: record.revision_id,
            recipe_id: record.recipe_id,
            user_id: record.user_id,
            revision_category: record.revision_category,
            revision_type: record.revision_type,
            previous_data: record.previous_data.clone(),
            new_data: record.new_data.clone(),
            change_comment: record.change_comment.clone(),
            created_at: record.created_at,
        }
    }
}

impl From<RevisionRecord> for RevisionDto {
    fn from(record: RevisionRecord) -> Self {
        Self {
            revision_id: record.revision_id,
            recipe_id: record.recipe_id,
            user_id: record.user_id,
            revision_category: record.revision_category,
            revision_type: record.revision_type,
            previous_data: record.previous_data,
            new_data: record.new_data,
            change_comment: record.change_comment,
            created_at: record.created_at,
        }
    }
}

pub fn to_dto(record: Option<&RevisionRecord>) -> Option<RevisionDto> {
    record.map(RevisionDto::from)
}

/// Same length and order as the input; `None` entries stay `None`.
pub fn to_dto_list(records: Option<&[Option<RevisionRecord>]>) -> Option<Vec<Option<RevisionDto>>> {
    records.map(|records| records.iter().map(|r| to_dto(r.as_ref())).collect())
}

pub fn to_dtos(records: &[RevisionRecord]) -> Vec<RevisionDto> {
    records.iter().map(RevisionDto::from).collect()
}
