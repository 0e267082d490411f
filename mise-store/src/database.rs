use std::path::Path;

use anyhow::{Context, Result};

use crate::config::DatabaseConfig;

#[derive(Clone)]
pub struct Database {
    pub pool: r2d2::Pool<r2d2_sqlite::SqliteConnectionManager>,
}

impl Database {
    /// Open (or create) the database file, then bring its schema up to date.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        if let Some(parent) = Path::new(&config.path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Creating database directory {}", parent.display()))?;
            }
        }
        // Cascading deletes need foreign keys, which SQLite enables per connection.
        let manager = r2d2_sqlite::SqliteConnectionManager::file(&config.path)
            .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
        let pool = r2d2::Pool::builder()
            .max_size(config.pool_size.max(1))
            .build(manager)
            .with_context(|| format!("Opening database {}", config.path))?;
        let me = Self { pool };
        me.migrate().await?;
        Ok(me)
    }

    /// Migrate the database to the latest version.
    async fn migrate(&self) -> Result<()> {
        let migrations = [include_str!("migrations/01-initial.sql")];
        // Without a metadata table nothing has been applied yet.
        let conn = self.pool.get()?;
        let current_version: String = conn
            .query_row(
                "SELECT value FROM metadata WHERE key = 'schema_version'",
                rusqlite::params![],
                |row| row.get(0),
            )
            .unwrap_or("0".to_string());
        let current_version = current_version.parse::<usize>().unwrap_or(0);
        tracing::info!(current_version, latest = migrations.len(), "Checking schema version");
        for (index, migration) in migrations.iter().enumerate().skip(current_version) {
            tracing::warn!(version = index + 1, "Applying migration");
            conn.execute_batch(migration)
                .with_context(|| format!("Applying migration {}", index + 1))?;
        }
        Ok(())
    }

    pub fn schema_version(&self) -> Result<u32> {
        let conn = self.pool.get()?;
        let version: String = conn.query_row(
            "SELECT value FROM metadata WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )?;
        Ok(version.parse()?)
    }

    /// Convenience method to collect rows from a query into a Vec.
    pub fn collect_rows<T: FromRow, P: rusqlite::Params>(
        &self,
        sql: &str,
        parameters: P,
    ) -> Result<Vec<T>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query(parameters)?;
        rows.mapped(T::from_row)
            .map(|r| r.map_err(Into::into))
            .collect::<Result<_>>()
    }

    /// Run a query that yields one integer, such as a `COUNT(*)`.
    pub fn count<P: rusqlite::Params>(&self, sql: &str, parameters: P) -> Result<i64> {
        let conn = self.pool.get()?;
        Ok(conn.query_row(sql, parameters, |row| row.get(0))?)
    }
}

pub trait FromRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self>
    where
        Self: Sized;
}
