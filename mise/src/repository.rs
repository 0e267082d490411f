//! The persistence seam for revision records.
use crate::errors::RevisionSerializationError;
use crate::record::RevisionRecord;
use crate::revision::Revision;

/// Stores revision records. Records are append-only: nothing here updates or
/// deletes one.
pub trait RevisionRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist `record`, returning it with `revision_id` assigned.
    fn save(&self, record: RevisionRecord) -> Result<RevisionRecord, Self::Error>;

    /// All records of a recipe, oldest first. Records created in the same
    /// instant keep their insertion order.
    fn find_by_recipe_order_by_created_at(
        &self,
        recipe_id: i64,
    ) -> Result<Vec<RevisionRecord>, Self::Error>;

    fn history(&self, recipe_id: i64) -> Result<History, Self::Error> {
        self.find_by_recipe_order_by_created_at(recipe_id).map(History::new)
    }
}

type DecodedRevision = Result<Option<Revision>, RevisionSerializationError>;

/// A recipe's records in order. Payloads are decoded only when iterated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    records: Vec<RevisionRecord>,
}

impl History {
    pub fn new(records: Vec<RevisionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[RevisionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn reversed(mut self) -> Self {
        self.records.reverse();
        self
    }

    /// Each record next to its decoded revision. A record that fails to
    /// decode yields its error without stopping the iteration.
    pub fn entries(&self) -> impl Iterator<Item = (&RevisionRecord, DecodedRevision)> {
        self.records.iter().map(|record| (record, record.revision()))
    }
}
