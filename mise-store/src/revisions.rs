//! SQLite storage for revision records.
use std::str::FromStr;

use anyhow::Result;
use chrono::NaiveDateTime;
use mise::{
    changes, Revision, RevisionCategory, RevisionRecord, RevisionRepository, RevisionResult,
    RevisionType,
};
use rusqlite::params;
use uuid::Uuid;

use crate::database::{Database, FromRow};
use crate::errors::{StoreError, StoreResult};

/// A window over a newest-first listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl Page {
    pub fn first(limit: i64) -> Self {
        Self { offset: 0, limit }
    }

    /// Everything. SQLite reads a negative limit as no limit.
    pub fn all() -> Self {
        Self { offset: 0, limit: -1 }
    }

    pub fn next(self) -> Self {
        Self {
            offset: self.offset + self.limit.max(0),
            ..self
        }
    }
}

/// Read a text column through `FromStr`, reporting failures against that column.
fn parse_column<T>(row: &rusqlite::Row, column: &str) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let text: String = row.get(column)?;
    text.parse().map_err(|e| {
        let index = row.as_ref().column_index(column).unwrap_or_default();
        rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(e))
    })
}

impl FromRow for RevisionRecord {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            revision_id: row.get("revision_id")?,
            recipe_id: row.get("recipe_id")?,
            user_id: row.get("user_id")?,
            revision_category: parse_column::<RevisionCategory>(row, "revision_category")?,
            revision_type: parse_column::<RevisionType>(row, "revision_type")?,
            previous_data: row.get("previous_data")?,
            new_data: row.get("new_data")?,
            change_comment: row.get("change_comment")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// Insert one record inside `tx`, refusing it when its recipe does not exist.
fn save_on(tx: &rusqlite::Transaction, record: RevisionRecord) -> StoreResult<RevisionRecord> {
    let recipe_exists: bool = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM Recipe WHERE recipe_id = ?)",
        params![record.recipe_id],
        |row| row.get(0),
    )?;
    if !recipe_exists {
        tracing::warn!(recipe_id = record.recipe_id, "Refusing revision for unknown recipe");
        return Err(StoreError::RecipeNotFound(record.recipe_id));
    }
    tx.execute(
        "INSERT INTO RecipeRevision
            (recipe_id, user_id, revision_category, revision_type,
             previous_data, new_data, change_comment, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            record.recipe_id,
            record.user_id,
            record.revision_category.as_str(),
            record.revision_type.as_str(),
            record.previous_data,
            record.new_data,
            record.change_comment,
            record.created_at,
        ],
    )?;
    let saved = record.with_revision_id(tx.last_insert_rowid());
    tracing::info!(
        revision_id = ?saved.revision_id,
        recipe_id = saved.recipe_id,
        category = saved.revision_category.as_str(),
        revision_type = saved.revision_type.as_str(),
        "Saved revision"
    );
    Ok(saved)
}

impl Database {
    /// Check, encode and save one revision.
    pub fn record_revision(
        &self,
        recipe_id: i64,
        user_id: Uuid,
        revision: &Revision,
        change_comment: Option<String>,
    ) -> StoreResult<RevisionRecord> {
        let record = RevisionRecord::for_revision(recipe_id, user_id, revision, change_comment)?;
        self.save(record)
    }

    /// Save derived revisions in order, each with its stock comment.
    ///
    /// All or nothing: every revision is checked and encoded before the first
    /// row is written, and the rows share one transaction.
    pub fn record_changes(
        &self,
        recipe_id: i64,
        user_id: Uuid,
        revisions: &[Revision],
    ) -> StoreResult<Vec<RevisionRecord>> {
        let records = revisions
            .iter()
            .map(|revision| {
                let comment = changes::change_comment(revision).to_string();
                RevisionRecord::for_revision(recipe_id, user_id, revision, Some(comment))
            })
            .collect::<RevisionResult<Vec<_>>>()?;
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;
        let saved = records
            .into_iter()
            .map(|record| save_on(&tx, record))
            .collect::<StoreResult<Vec<_>>>()?;
        tx.commit()?;
        Ok(saved)
    }

    /// Every revision of a recipe, oldest first, ties broken by insertion order.
    pub fn revisions_for_recipe(&self, recipe_id: i64) -> Result<Vec<RevisionRecord>> {
        self.collect_rows(
            "SELECT * FROM RecipeRevision
            WHERE recipe_id = ?
            ORDER BY created_at, revision_id",
            params![recipe_id],
        )
    }

    pub fn revisions_by_category(
        &self,
        recipe_id: i64,
        category: RevisionCategory,
        page: Page,
    ) -> Result<Vec<RevisionRecord>> {
        self.collect_rows(
            "SELECT * FROM RecipeRevision
            WHERE recipe_id = ? AND revision_category = ?
            ORDER BY created_at DESC, revision_id DESC
            LIMIT ? OFFSET ?",
            params![recipe_id, category.as_str(), page.limit, page.offset],
        )
    }

    pub fn revisions_by_type(
        &self,
        recipe_id: i64,
        revision_type: RevisionType,
        page: Page,
    ) -> Result<Vec<RevisionRecord>> {
        self.collect_rows(
            "SELECT * FROM RecipeRevision
            WHERE recipe_id = ? AND revision_type = ?
            ORDER BY created_at DESC, revision_id DESC
            LIMIT ? OFFSET ?",
            params![recipe_id, revision_type.as_str(), page.limit, page.offset],
        )
    }

    /// Everything a user has changed, across recipes, newest first.
    pub fn revisions_by_user(&self, user_id: Uuid, page: Page) -> Result<Vec<RevisionRecord>> {
        self.collect_rows(
            "SELECT * FROM RecipeRevision
            WHERE user_id = ?
            ORDER BY created_at DESC, revision_id DESC
            LIMIT ? OFFSET ?",
            params![user_id, page.limit, page.offset],
        )
    }

    pub fn revisions_by_user_and_recipe(
        &self,
        user_id: Uuid,
        recipe_id: i64,
        page: Page,
    ) -> Result<Vec<RevisionRecord>> {
        self.collect_rows(
            "SELECT * FROM RecipeRevision
            WHERE user_id = ? AND recipe_id = ?
            ORDER BY created_at DESC, revision_id DESC
            LIMIT ? OFFSET ?",
            params![user_id, recipe_id, page.limit, page.offset],
        )
    }

    pub fn count_revisions_for_recipe(&self, recipe_id: i64) -> Result<i64> {
        self.count(
            "SELECT COUNT(*) FROM RecipeRevision WHERE recipe_id = ?",
            params![recipe_id],
        )
    }

    pub fn count_revisions_by_user(&self, user_id: Uuid) -> Result<i64> {
        self.count(
            "SELECT COUNT(*) FROM RecipeRevision WHERE user_id = ?",
            params![user_id],
        )
    }

    pub fn latest_revision(&self, recipe_id: i64) -> Result<Option<RevisionRecord>> {
        Ok(self
            .collect_rows(
                "SELECT * FROM RecipeRevision
                WHERE recipe_id = ?
                ORDER BY created_at DESC, revision_id DESC
                LIMIT 1",
                params![recipe_id],
            )?
            .pop())
    }

    /// Revisions created between `start` and `end`, both inclusive, newest first.
    pub fn revisions_in_range(
        &self,
        recipe_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        page: Page,
    ) -> Result<Vec<RevisionRecord>> {
        self.collect_rows(
            "SELECT * FROM RecipeRevision
            WHERE recipe_id = ? AND created_at >= ? AND created_at <= ?
            ORDER BY created_at DESC, revision_id DESC
            LIMIT ? OFFSET ?",
            params![recipe_id, start, end, page.limit, page.offset],
        )
    }

    /// The history of one ingredient line, oldest first.
    ///
    /// Rows whose data is not JSON cannot be attributed to a line and are left out.
    pub fn ingredient_revisions(
        &self,
        recipe_id: i64,
        ingredient_id: i64,
    ) -> Result<Vec<RevisionRecord>> {
        self.collect_rows(
            "SELECT * FROM RecipeRevision
            WHERE recipe_id = ? AND revision_category = 'INGREDIENT'
                AND CASE WHEN json_valid(COALESCE(new_data, previous_data))
                    THEN json_extract(COALESCE(new_data, previous_data), '$.ingredientId')
                END = ?
            ORDER BY created_at, revision_id",
            params![recipe_id, ingredient_id],
        )
    }

    /// The history of one step, oldest first. Non-JSON rows are left out.
    pub fn step_revisions(&self, recipe_id: i64, step_id: i64) -> Result<Vec<RevisionRecord>> {
        self.collect_rows(
            "SELECT * FROM RecipeRevision
            WHERE recipe_id = ? AND revision_category = 'STEP'
                AND CASE WHEN json_valid(COALESCE(new_data, previous_data))
                    THEN json_extract(COALESCE(new_data, previous_data), '$.stepId')
                END = ?
            ORDER BY created_at, revision_id",
            params![recipe_id, step_id],
        )
    }
}

impl RevisionRepository for Database {
    type Error = StoreError;

    fn save(&self, record: RevisionRecord) -> StoreResult<RevisionRecord> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;
        let saved = save_on(&tx, record)?;
        tx.commit()?;
        Ok(saved)
    }

    fn find_by_recipe_order_by_created_at(
        &self,
        recipe_id: i64,
    ) -> StoreResult<Vec<RevisionRecord>> {
        Ok(self.revisions_for_recipe(recipe_id)?)
    }
}
