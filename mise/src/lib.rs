//! Structured edit history for recipes.
//!
//! Every edit to a recipe's ingredients or steps is described as a typed
//! [`Revision`], checked, encoded to a self-describing JSON blob and kept in a
//! [`RevisionRecord`] next to the tag pair needed to read it back.
pub mod changes;
pub mod codec;
pub mod errors;
pub mod mapper;
pub mod record;
pub mod repository;
pub mod revision;
pub mod taxonomy;
pub mod value;

pub use errors::{
    RevisionError, RevisionResult, RevisionSerializationError, Rule, SerializationErrorKind,
    Violation,
};
pub use mapper::RevisionDto;
pub use record::RevisionRecord;
pub use repository::{History, RevisionRepository};
pub use revision::{
    IngredientChange, IngredientSnapshot, IngredientUpdate, Revision, RevisionFields, StepChange,
    StepSnapshot, StepUpdate,
};
pub use taxonomy::{IngredientField, IngredientUnit, RevisionCategory, RevisionType, StepField};
pub use value::FieldValue;
