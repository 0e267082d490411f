use anyhow::Result;
use chrono::NaiveDateTime;
use mise::RevisionRecord;
use rusqlite::params;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::{Database, FromRow};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub recipe_id: i64,
    pub user_id: Uuid,
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl FromRow for Recipe {
    /// Create a recipe from an sql row, provided by rusqlite, using named columns.
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            recipe_id: row.get("recipe_id")?,
            user_id: row.get("user_id")?,
            name: row.get("name")?,
            created_at: row.get("created_at")?,
        })
    }
}

impl Recipe {
    /// Create a new recipe owned by `user_id`.
    pub fn push(db: &Database, user_id: Uuid, name: &str) -> Result<Self> {
        let created_at = mise::record::current_timestamp();
        let conn = db.pool.get()?;
        conn.execute(
            "INSERT INTO Recipe (user_id, name, created_at) VALUES (?, ?, ?)",
            params![user_id, name, created_at],
        )?;
        Ok(Self {
            recipe_id: conn.last_insert_rowid(),
            user_id,
            name: name.to_string(),
            created_at,
        })
    }

    /// Get a recipe by ID
    pub fn get_by_id(db: &Database, recipe_id: i64) -> Result<Option<Self>> {
        Ok(db
            .collect_rows("SELECT * FROM Recipe WHERE recipe_id = ?", params![recipe_id])?
            .pop())
    }

    /// List the recipes a user owns, oldest first.
    pub fn list_for_user(db: &Database, user_id: Uuid) -> Result<Vec<Self>> {
        db.collect_rows(
            "SELECT * FROM Recipe WHERE user_id = ? ORDER BY created_at, recipe_id",
            params![user_id],
        )
    }

    /// Delete the recipe. Its revisions go with it.
    pub fn delete(self, db: &Database) -> Result<()> {
        let conn = db.pool.get()?;
        conn.execute("DELETE FROM Recipe WHERE recipe_id = ?", params![self.recipe_id])?;
        tracing::info!(recipe_id = self.recipe_id, "Deleted recipe");
        Ok(())
    }

    /// Get all the revisions of a recipe, oldest first
    pub fn get_revisions(&self, db: &Database) -> Result<Vec<RevisionRecord>> {
        db.revisions_for_recipe(self.recipe_id)
    }
}
