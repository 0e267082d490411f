//! JSON text form of a [`Revision`], as stored in a record's data columns.
//!
//! The blob is a flat object: `category`, `type`, then the shape's own fields
//! by their camelCase names, with absent values written as `null`. Decoding is
//! driven by the tag pair stored *next to* the blob; the embedded tags must
//! agree with it.
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::{RevisionSerializationError, SerializationErrorKind};
use crate::revision::Revision;
use crate::taxonomy::{RevisionCategory, RevisionType};

pub const CATEGORY_KEY: &str = "category";
pub const TYPE_KEY: &str = "type";

/// Serialize a revision, embedding its tag pair.
pub fn encode(revision: &Revision) -> Result<String, RevisionSerializationError> {
    let (category, revision_type) = revision.tag();
    let fail = |kind| {
        let err = RevisionSerializationError::new(category, revision_type, "", kind);
        tracing::error!("Error converting revision to JSON: {}", err);
        err
    };
    let payload = match revision {
        Revision::IngredientAdd(s) | Revision::IngredientDelete(s) => payload_object(s),
        Revision::IngredientUpdate(u) => payload_object(u),
        Revision::StepAdd(s) | Revision::StepDelete(s) => payload_object(s),
        Revision::StepUpdate(u) => payload_object(u),
    }
    .map_err(fail)?;

    let mut object = Map::new();
    object.insert(CATEGORY_KEY.into(), Value::String(category.as_str().into()));
    object.insert(TYPE_KEY.into(), Value::String(revision_type.as_str().into()));
    object.extend(payload);
    let json = serde_json::to_string(&Value::Object(object))
        .map_err(|e| fail(SerializationErrorKind::Encode(e.to_string())))?;
    tracing::debug!("Converted revision to JSON: {}", json);
    Ok(json)
}

/// Parse `text` as the shape selected by `(category, revision_type)`.
///
/// Fails when the text is not a JSON object, when its embedded tags differ
/// from the given pair, when a key does not belong to the shape, or when a
/// required field is null or absent.
pub fn decode(
    category: RevisionCategory,
    revision_type: RevisionType,
    text: &str,
) -> Result<Revision, RevisionSerializationError> {
    let fail = |kind| {
        let err = RevisionSerializationError::new(category, revision_type, text, kind);
        tracing::error!("Error converting JSON to revision: {}", err);
        err
    };

    let value: Value = serde_json::from_str(text)
        .map_err(|e| fail(SerializationErrorKind::Malformed(e.to_string())))?;
    let Value::Object(mut object) = value else {
        return Err(fail(SerializationErrorKind::NotAnObject));
    };
    take_tag(&mut object, CATEGORY_KEY, category.as_str()).map_err(fail)?;
    take_tag(&mut object, TYPE_KEY, revision_type.as_str()).map_err(fail)?;

    let revision = match (category, revision_type) {
        (RevisionCategory::Ingredient, RevisionType::Add) => {
            parse_payload(object).map(Revision::IngredientAdd)
        }
        (RevisionCategory::Ingredient, RevisionType::Update) => {
            parse_payload(object).map(Revision::IngredientUpdate)
        }
        (RevisionCategory::Ingredient, RevisionType::Delete) => {
            parse_payload(object).map(Revision::IngredientDelete)
        }
        (RevisionCategory::Step, RevisionType::Add) => parse_payload(object).map(Revision::StepAdd),
        (RevisionCategory::Step, RevisionType::Update) => {
            parse_payload(object).map(Revision::StepUpdate)
        }
        (RevisionCategory::Step, RevisionType::Delete) => {
            parse_payload(object).map(Revision::StepDelete)
        }
    }
    .map_err(fail)?;

    if let Some(field) = revision.missing_required() {
        return Err(fail(SerializationErrorKind::MissingField(field)));
    }
    tracing::debug!("Converted JSON to revision: {:?}", revision);
    Ok(revision)
}

/// Like [`decode`], but an absent or blank column means "no revision".
pub fn decode_optional(
    category: RevisionCategory,
    revision_type: RevisionType,
    text: Option<&str>,
) -> Result<Option<Revision>, RevisionSerializationError> {
    match text {
        Some(text) if !text.trim().is_empty() => decode(category, revision_type, text).map(Some),
        _ => Ok(None),
    }
}

fn payload_object<T: Serialize>(payload: &T) -> Result<Map<String, Value>, SerializationErrorKind> {
    match serde_json::to_value(payload) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(SerializationErrorKind::NotAnObject),
        Err(e) => Err(SerializationErrorKind::Encode(e.to_string())),
    }
}

fn parse_payload<T: DeserializeOwned>(
    object: Map<String, Value>,
) -> Result<T, SerializationErrorKind> {
    serde_json::from_value(Value::Object(object))
        .map_err(|e| SerializationErrorKind::InvalidPayload(e.to_string()))
}

fn take_tag(
    object: &mut Map<String, Value>,
    field: &'static str,
    expected: &'static str,
) -> Result<(), SerializationErrorKind> {
    match object.remove(field) {
        Some(Value::String(found)) if found == expected => Ok(()),
        None | Some(Value::Null) => Err(SerializationErrorKind::MissingField(field)),
        Some(Value::String(found)) => Err(SerializationErrorKind::TagMismatch {
            field,
            expected,
            found,
        }),
        Some(other) => Err(SerializationErrorKind::TagMismatch {
            field,
            expected,
            found: other.to_string(),
        }),
    }
}
