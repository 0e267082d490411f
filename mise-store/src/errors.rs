pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0:#}")]
    Database(#[from] anyhow::Error),
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error(transparent)]
    Revision(#[from] mise::RevisionError),
    #[error("Recipe {0} not found")]
    RecipeNotFound(i64),
}
