//! The six revision shapes and their validity rules.
//!
//! A [`Revision`] is one typed mutation to one ingredient or one step. Every
//! payload field is optional so that a half-filled draft can still be
//! represented and asked [`Revision::violations`]; only a draft with no
//! violations should ever be recorded.
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{RevisionError, RevisionResult, Rule, Violation};
use crate::taxonomy::{IngredientField, IngredientUnit, RevisionCategory, RevisionType, StepField};
use crate::value::FieldValue;

/// The state of an ingredient line being introduced (add) or removed (delete).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct IngredientSnapshot {
    pub ingredient_id: Option<i64>,
    pub ingredient_name: Option<String>,
    #[serde(with = "crate::value::exact_decimal")]
    pub quantity: Option<Decimal>,
    pub unit: Option<IngredientUnit>,
    pub is_optional: Option<bool>,
    pub description: Option<String>,
}

impl IngredientSnapshot {
    pub fn new(
        ingredient_id: i64,
        ingredient_name: impl Into<String>,
        quantity: Decimal,
        unit: IngredientUnit,
        is_optional: bool,
    ) -> Self {
        Self {
            ingredient_id: Some(ingredient_id),
            ingredient_name: Some(ingredient_name.into()),
            quantity: Some(quantity),
            unit: Some(unit),
            is_optional: Some(is_optional),
            description: None,
        }
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..self
        }
    }

    pub fn with_quantity(self, quantity: Option<Decimal>) -> Self {
        Self { quantity, ..self }
    }

    pub fn with_unit(self, unit: Option<IngredientUnit>) -> Self {
        Self { unit, ..self }
    }

    fn violations(&self, out: &mut Vec<Violation>) {
        check_ingredient_identity(self.ingredient_id, self.ingredient_name.as_deref(), out);
        match self.quantity {
            None => out.push(Violation::new("quantity", Rule::Missing)),
            Some(quantity) if quantity <= Decimal::ZERO => {
                out.push(Violation::new("quantity", Rule::NotPositive))
            }
            Some(_) => {}
        }
        if self.unit.is_none() {
            out.push(Violation::new("unit", Rule::Missing));
        }
        if self.is_optional.is_none() {
            out.push(Violation::new("isOptional", Rule::Missing));
        }
    }

    pub(crate) fn missing_required(&self) -> Option<&'static str> {
        first_missing([
            ("ingredientId", self.ingredient_id.is_none()),
            ("ingredientName", self.ingredient_name.is_none()),
            ("quantity", self.quantity.is_none()),
            ("unit", self.unit.is_none()),
            ("isOptional", self.is_optional.is_none()),
        ])
    }
}

/// One changed attribute of an existing ingredient line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct IngredientUpdate {
    pub ingredient_id: Option<i64>,
    pub ingredient_name: Option<String>,
    pub changed_field: Option<IngredientField>,
    pub previous_value: Option<FieldValue>,
    pub new_value: Option<FieldValue>,
}

/// Typed reading of an [`IngredientUpdate`]'s value pair, selected by its changed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngredientChange {
    Quantity(Decimal, Decimal),
    Unit(IngredientUnit, IngredientUnit),
    OptionalStatus(bool, bool),
    Description(String, String),
}

impl IngredientUpdate {
    pub fn new(
        ingredient_id: i64,
        ingredient_name: impl Into<String>,
        changed_field: IngredientField,
        previous_value: impl Into<FieldValue>,
        new_value: impl Into<FieldValue>,
    ) -> Self {
        Self {
            ingredient_id: Some(ingredient_id),
            ingredient_name: Some(ingredient_name.into()),
            changed_field: Some(changed_field),
            previous_value: Some(previous_value.into()),
            new_value: Some(new_value.into()),
        }
    }

    pub fn with_values(
        self,
        previous_value: Option<FieldValue>,
        new_value: Option<FieldValue>,
    ) -> Self {
        Self {
            previous_value,
            new_value,
            ..self
        }
    }

    /// Re-type the value pair by the changed field.
    ///
    /// `None` when a part is missing or a value does not fit the field, e.g. a
    /// `UNIT` change whose values are not unit names.
    pub fn change(&self) -> Option<IngredientChange> {
        let (previous, new) = (self.previous_value.as_ref()?, self.new_value.as_ref()?);
        Some(match self.changed_field? {
            IngredientField::Quantity => {
                IngredientChange::Quantity(previous.as_decimal()?, new.as_decimal()?)
            }
            IngredientField::Unit => IngredientChange::Unit(previous.as_unit()?, new.as_unit()?),
            IngredientField::OptionalStatus => {
                IngredientChange::OptionalStatus(previous.as_bool()?, new.as_bool()?)
            }
            IngredientField::Description => IngredientChange::Description(
                previous.as_text()?.to_string(),
                new.as_text()?.to_string(),
            ),
        })
    }

    fn violations(&self, out: &mut Vec<Violation>) {
        check_ingredient_identity(self.ingredient_id, self.ingredient_name.as_deref(), out);
        if self.changed_field.is_none() {
            out.push(Violation::new("changedField", Rule::Missing));
        }
        check_value_pair(self.previous_value.as_ref(), self.new_value.as_ref(), out);
    }

    pub(crate) fn missing_required(&self) -> Option<&'static str> {
        first_missing([
            ("ingredientId", self.ingredient_id.is_none()),
            ("ingredientName", self.ingredient_name.is_none()),
            ("changedField", self.changed_field.is_none()),
            ("previousValue", self.previous_value.is_none()),
            ("newValue", self.new_value.is_none()),
        ])
    }
}

/// The state of a step being introduced (add) or removed (delete).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct StepSnapshot {
    pub step_id: Option<i64>,
    pub step_number: Option<i32>,
    pub instruction: Option<String>,
    pub optional: Option<bool>,
    pub timer_seconds: Option<i32>,
}

impl StepSnapshot {
    pub fn new(
        step_id: i64,
        step_number: i32,
        instruction: impl Into<String>,
        optional: bool,
    ) -> Self {
        Self {
            step_id: Some(step_id),
            step_number: Some(step_number),
            instruction: Some(instruction.into()),
            optional: Some(optional),
            timer_seconds: None,
        }
    }

    pub fn with_timer_seconds(self, timer_seconds: Option<i32>) -> Self {
        Self {
            timer_seconds,
            ..self
        }
    }

    pub fn with_step_number(self, step_number: Option<i32>) -> Self {
        Self {
            step_number,
            ..self
        }
    }

    fn violations(&self, out: &mut Vec<Violation>) {
        check_step_identity(self.step_id, self.step_number, out);
        match self.instruction.as_deref() {
            None => out.push(Violation::new("instruction", Rule::Missing)),
            Some(text) if text.trim().is_empty() => {
                out.push(Violation::new("instruction", Rule::Blank))
            }
            Some(_) => {}
        }
        if self.optional.is_none() {
            out.push(Violation::new("optional", Rule::Missing));
        }
    }

    pub(crate) fn missing_required(&self) -> Option<&'static str> {
        first_missing([
            ("stepId", self.step_id.is_none()),
            ("stepNumber", self.step_number.is_none()),
            ("instruction", self.instruction.is_none()),
            ("optional", self.optional.is_none()),
        ])
    }
}

/// One changed attribute of an existing step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct StepUpdate {
    pub step_id: Option<i64>,
    pub step_number: Option<i32>,
    pub changed_field: Option<StepField>,
    pub previous_value: Option<FieldValue>,
    pub new_value: Option<FieldValue>,
}

/// Typed reading of a [`StepUpdate`]'s value pair, selected by its changed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepChange {
    Instruction(String, String),
    StepNumber(i32, i32),
    OptionalStatus(bool, bool),
    Timer(i32, i32),
}

impl StepUpdate {
    pub fn new(
        step_id: i64,
        step_number: i32,
        changed_field: StepField,
        previous_value: impl Into<FieldValue>,
        new_value: impl Into<FieldValue>,
    ) -> Self {
        Self {
            step_id: Some(step_id),
            step_number: Some(step_number),
            changed_field: Some(changed_field),
            previous_value: Some(previous_value.into()),
            new_value: Some(new_value.into()),
        }
    }

    pub fn with_values(
        self,
        previous_value: Option<FieldValue>,
        new_value: Option<FieldValue>,
    ) -> Self {
        Self {
            previous_value,
            new_value,
            ..self
        }
    }

    pub fn change(&self) -> Option<StepChange> {
        let (previous, new) = (self.previous_value.as_ref()?, self.new_value.as_ref()?);
        Some(match self.changed_field? {
            StepField::Instruction => StepChange::Instruction(
                previous.as_text()?.to_string(),
                new.as_text()?.to_string(),
            ),
            StepField::StepNumber => StepChange::StepNumber(previous.as_i32()?, new.as_i32()?),
            StepField::OptionalStatus => {
                StepChange::OptionalStatus(previous.as_bool()?, new.as_bool()?)
            }
            StepField::Timer => StepChange::Timer(previous.as_i32()?, new.as_i32()?),
        })
    }

    fn violations(&self, out: &mut Vec<Violation>) {
        check_step_identity(self.step_id, self.step_number, out);
        if self.changed_field.is_none() {
            out.push(Violation::new("changedField", Rule::Missing));
        }
        check_value_pair(self.previous_value.as_ref(), self.new_value.as_ref(), out);
    }

    pub(crate) fn missing_required(&self) -> Option<&'static str> {
        first_missing([
            ("stepId", self.step_id.is_none()),
            ("stepNumber", self.step_number.is_none()),
            ("changedField", self.changed_field.is_none()),
            ("previousValue", self.previous_value.is_none()),
            ("newValue", self.new_value.is_none()),
        ])
    }
}

/// One typed mutation. The case is the (category, type) tag pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Revision {
    IngredientAdd(IngredientSnapshot),
    IngredientUpdate(IngredientUpdate),
    IngredientDelete(IngredientSnapshot),
    StepAdd(StepSnapshot),
    StepUpdate(StepUpdate),
    StepDelete(StepSnapshot),
}

impl Revision {
    /// The all-empty draft for a tag pair.
    pub fn empty(category: RevisionCategory, revision_type: RevisionType) -> Self {
        match (category, revision_type) {
            (RevisionCategory::Ingredient, RevisionType::Add) => {
                Revision::IngredientAdd(Default::default())
            }
            (RevisionCategory::Ingredient, RevisionType::Update) => {
                Revision::IngredientUpdate(Default::default())
            }
            (RevisionCategory::Ingredient, RevisionType::Delete) => {
                Revision::IngredientDelete(Default::default())
            }
            (RevisionCategory::Step, RevisionType::Add) => Revision::StepAdd(Default::default()),
            (RevisionCategory::Step, RevisionType::Update) => {
                Revision::StepUpdate(Default::default())
            }
            (RevisionCategory::Step, RevisionType::Delete) => {
                Revision::StepDelete(Default::default())
            }
        }
    }

    /// Build the shape selected by `(category, revision_type)` from a flat set of fields.
    ///
    /// Fields that the selected shape does not have must be left empty.
    pub fn build(
        category: RevisionCategory,
        revision_type: RevisionType,
        fields: RevisionFields,
    ) -> RevisionResult<Self> {
        if let Some(field) = fields.foreign_to(category, revision_type) {
            return Err(RevisionError::ForeignField {
                category,
                revision_type,
                field,
            });
        }
        let RevisionFields {
            ingredient_id,
            ingredient_name,
            quantity,
            unit,
            is_optional,
            description,
            step_id,
            step_number,
            instruction,
            optional,
            timer_seconds,
            ingredient_field,
            step_field,
            previous_value,
            new_value,
        } = fields;
        let ingredient = IngredientSnapshot {
            ingredient_id,
            ingredient_name,
            quantity,
            unit,
            is_optional,
            description,
        };
        let step = StepSnapshot {
            step_id,
            step_number,
            instruction,
            optional,
            timer_seconds,
        };
        Ok(match (category, revision_type) {
            (RevisionCategory::Ingredient, RevisionType::Add) => {
                Revision::IngredientAdd(ingredient)
            }
            (RevisionCategory::Ingredient, RevisionType::Delete) => {
                Revision::IngredientDelete(ingredient)
            }
            (RevisionCategory::Ingredient, RevisionType::Update) => {
                Revision::IngredientUpdate(IngredientUpdate {
                    ingredient_id: ingredient.ingredient_id,
                    ingredient_name: ingredient.ingredient_name,
                    changed_field: ingredient_field,
                    previous_value,
                    new_value,
                })
            }
            (RevisionCategory::Step, RevisionType::Add) => Revision::StepAdd(step),
            (RevisionCategory::Step, RevisionType::Delete) => Revision::StepDelete(step),
            (RevisionCategory::Step, RevisionType::Update) => Revision::StepUpdate(StepUpdate {
                step_id: step.step_id,
                step_number: step.step_number,
                changed_field: step_field,
                previous_value,
                new_value,
            }),
        })
    }

    pub fn category(&self) -> RevisionCategory {
        match self {
            Revision::IngredientAdd(_)
            | Revision::IngredientUpdate(_)
            | Revision::IngredientDelete(_) => RevisionCategory::Ingredient,
            Revision::StepAdd(_) | Revision::StepUpdate(_) | Revision::StepDelete(_) => {
                RevisionCategory::Step
            }
        }
    }

    pub fn revision_type(&self) -> RevisionType {
        match self {
            Revision::IngredientAdd(_) | Revision::StepAdd(_) => RevisionType::Add,
            Revision::IngredientUpdate(_) | Revision::StepUpdate(_) => RevisionType::Update,
            Revision::IngredientDelete(_) | Revision::StepDelete(_) => RevisionType::Delete,
        }
    }

    pub fn tag(&self) -> (RevisionCategory, RevisionType) {
        (self.category(), self.revision_type())
    }

    /// The id of the ingredient or step this revision is about, if known.
    pub fn subject_id(&self) -> Option<i64> {
        match self {
            Revision::IngredientAdd(s) | Revision::IngredientDelete(s) => s.ingredient_id,
            Revision::IngredientUpdate(u) => u.ingredient_id,
            Revision::StepAdd(s) | Revision::StepDelete(s) => s.step_id,
            Revision::StepUpdate(u) => u.step_id,
        }
    }

    /// Every rule this revision breaks, in field order. Empty for a valid revision.
    pub fn violations(&self) -> Vec<Violation> {
        let mut out = vec![];
        match self {
            Revision::IngredientAdd(s) | Revision::IngredientDelete(s) => s.violations(&mut out),
            Revision::IngredientUpdate(u) => u.violations(&mut out),
            Revision::StepAdd(s) | Revision::StepDelete(s) => s.violations(&mut out),
            Revision::StepUpdate(u) => u.violations(&mut out),
        }
        out
    }

    pub fn is_valid(&self) -> bool {
        self.violations().is_empty()
    }

    pub(crate) fn missing_required(&self) -> Option<&'static str> {
        match self {
            Revision::IngredientAdd(s) | Revision::IngredientDelete(s) => s.missing_required(),
            Revision::IngredientUpdate(u) => u.missing_required(),
            Revision::StepAdd(s) | Revision::StepDelete(s) => s.missing_required(),
            Revision::StepUpdate(u) => u.missing_required(),
        }
    }
}

/// Every field any revision shape can carry, for [`Revision::build`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevisionFields {
    pub ingredient_id: Option<i64>,
    pub ingredient_name: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit: Option<IngredientUnit>,
    pub is_optional: Option<bool>,
    pub description: Option<String>,
    pub step_id: Option<i64>,
    pub step_number: Option<i32>,
    pub instruction: Option<String>,
    pub optional: Option<bool>,
    pub timer_seconds: Option<i32>,
    pub ingredient_field: Option<IngredientField>,
    pub step_field: Option<StepField>,
    pub previous_value: Option<FieldValue>,
    pub new_value: Option<FieldValue>,
}

impl RevisionFields {
    fn foreign_to(
        &self,
        category: RevisionCategory,
        revision_type: RevisionType,
    ) -> Option<&'static str> {
        let ingredient = category == RevisionCategory::Ingredient;
        let step = category == RevisionCategory::Step;
        let update = revision_type == RevisionType::Update;
        [
            ("ingredientId", self.ingredient_id.is_some(), ingredient),
            ("ingredientName", self.ingredient_name.is_some(), ingredient),
            ("quantity", self.quantity.is_some(), ingredient && !update),
            ("unit", self.unit.is_some(), ingredient && !update),
            ("isOptional", self.is_optional.is_some(), ingredient && !update),
            ("description", self.description.is_some(), ingredient && !update),
            ("stepId", self.step_id.is_some(), step),
            ("stepNumber", self.step_number.is_some(), step),
            ("instruction", self.instruction.is_some(), step && !update),
            ("optional", self.optional.is_some(), step && !update),
            ("timerSeconds", self.timer_seconds.is_some(), step && !update),
            ("changedField", self.ingredient_field.is_some(), ingredient && update),
            ("changedField", self.step_field.is_some(), step && update),
            ("previousValue", self.previous_value.is_some(), update),
            ("newValue", self.new_value.is_some(), update),
        ]
        .into_iter()
        .find(|(_, present, allowed)| *present && !allowed)
        .map(|(name, _, _)| name)
    }
}

fn check_ingredient_identity(id: Option<i64>, name: Option<&str>, out: &mut Vec<Violation>) {
    if id.is_none() {
        out.push(Violation::new("ingredientId", Rule::Missing));
    }
    match name {
        None => out.push(Violation::new("ingredientName", Rule::Missing)),
        Some(name) if name.trim().is_empty() => {
            out.push(Violation::new("ingredientName", Rule::Blank))
        }
        Some(_) => {}
    }
}

fn check_step_identity(id: Option<i64>, number: Option<i32>, out: &mut Vec<Violation>) {
    if id.is_none() {
        out.push(Violation::new("stepId", Rule::Missing));
    }
    match number {
        None => out.push(Violation::new("stepNumber", Rule::Missing)),
        Some(number) if number < 1 => out.push(Violation::new("stepNumber", Rule::BelowOne)),
        Some(_) => {}
    }
}

fn check_value_pair(
    previous: Option<&FieldValue>,
    new: Option<&FieldValue>,
    out: &mut Vec<Violation>,
) {
    if previous.is_none() {
        out.push(Violation::new("previousValue", Rule::Missing));
    }
    match new {
        None => out.push(Violation::new("newValue", Rule::Missing)),
        Some(new) if previous == Some(new) => out.push(Violation::new("newValue", Rule::Unchanged)),
        Some(_) => {}
    }
}

fn first_missing<const N: usize>(fields: [(&'static str, bool); N]) -> Option<&'static str> {
    fields
        .into_iter()
        .find(|(_, missing)| *missing)
        .map(|(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::all_tags;

    fn flour() -> IngredientSnapshot {
        IngredientSnapshot::new(1, "Flour", Decimal::new(25, 1), IngredientUnit::Cup, false)
    }

    #[test]
    fn ingredient_add_with_all_fields_is_valid() {
        let revision = Revision::IngredientAdd(flour());
        assert!(revision.is_valid());
        assert_eq!(revision.tag(), (RevisionCategory::Ingredient, RevisionType::Add));
    }

    #[test]
    fn zero_quantity_is_invalid() {
        let revision = Revision::IngredientAdd(flour().with_quantity(Some(Decimal::ZERO)));
        assert!(!revision.is_valid());
        assert_eq!(
            revision.violations(),
            vec![Violation::new("quantity", Rule::NotPositive)]
        );
        let negative = Revision::IngredientDelete(flour().with_quantity(Some(Decimal::new(-1, 0))));
        assert!(!negative.is_valid());
    }

    #[test]
    fn ingredient_delete_mirrors_add() {
        assert!(Revision::IngredientDelete(flour()).is_valid());
        let no_unit = Revision::IngredientDelete(flour().with_unit(None));
        assert_eq!(no_unit.violations(), vec![Violation::new("unit", Rule::Missing)]);
    }

    #[test]
    fn blank_ingredient_name_is_invalid() {
        let revision = Revision::IngredientAdd(IngredientSnapshot {
            ingredient_name: Some("   ".into()),
            ..flour()
        });
        assert_eq!(
            revision.violations(),
            vec![Violation::new("ingredientName", Rule::Blank)]
        );
    }

    #[test]
    fn update_with_equal_values_is_invalid() {
        let salt = IngredientUpdate::new(
            1,
            "Salt",
            IngredientField::Quantity,
            Decimal::new(10, 1),
            Decimal::new(10, 1),
        );
        let revision = Revision::IngredientUpdate(salt);
        assert!(!revision.is_valid());
        assert_eq!(
            revision.violations(),
            vec![Violation::new("newValue", Rule::Unchanged)]
        );
    }

    #[test]
    fn equal_decimals_with_different_scale_are_unchanged() {
        let salt = IngredientUpdate::new(
            1,
            "Salt",
            IngredientField::Quantity,
            Decimal::new(10, 1),
            Decimal::new(100, 2),
        );
        assert!(!Revision::IngredientUpdate(salt).is_valid());
    }

    #[test]
    fn update_needs_both_values() {
        let base = StepUpdate::new(1, 1, StepField::Instruction, "Old", "New");
        assert!(Revision::StepUpdate(base.clone()).is_valid());
        let no_previous = base.clone().with_values(None, Some("New".into()));
        assert_eq!(
            Revision::StepUpdate(no_previous).violations(),
            vec![Violation::new("previousValue", Rule::Missing)]
        );
        let no_new = base.with_values(Some("Old".into()), None);
        assert_eq!(
            Revision::StepUpdate(no_new).violations(),
            vec![Violation::new("newValue", Rule::Missing)]
        );
    }

    #[test]
    fn step_update_with_same_values_is_invalid() {
        let revision = Revision::StepUpdate(StepUpdate::new(
            1,
            1,
            StepField::Instruction,
            "Same value",
            "Same value",
        ));
        assert!(!revision.is_valid());
    }

    #[test]
    fn step_updates_accept_every_value_kind() {
        for update in [
            StepUpdate::new(1, 2, StepField::StepNumber, 1, 2),
            StepUpdate::new(1, 1, StepField::OptionalStatus, false, true),
            StepUpdate::new(1, 1, StepField::Timer, 300, 600),
        ] {
            assert!(Revision::StepUpdate(update).is_valid());
        }
    }

    #[test]
    fn step_delete_without_timer_is_valid() {
        let revision = Revision::StepDelete(StepSnapshot::new(3, 2, "Remove from heat", true));
        assert!(revision.is_valid());
    }

    #[test]
    fn step_number_must_be_positive() {
        let step = StepSnapshot::new(1, 1, "Mix", false).with_step_number(Some(0));
        assert_eq!(
            Revision::StepAdd(step).violations(),
            vec![Violation::new("stepNumber", Rule::BelowOne)]
        );
    }

    #[test]
    fn negative_timer_is_not_checked() {
        let step = StepSnapshot::new(1, 1, "Rest", false).with_timer_seconds(Some(-5));
        assert!(Revision::StepAdd(step).is_valid());
    }

    #[test]
    fn empty_drafts_are_invalid_but_never_panic() {
        for (category, ty) in all_tags() {
            let revision = Revision::empty(category, ty);
            assert_eq!(revision.tag(), (category, ty));
            assert!(!revision.is_valid());
            assert!(!revision.violations().is_empty());
        }
    }

    #[test]
    fn empty_ingredient_add_lists_every_missing_field() {
        let fields: Vec<_> = Revision::empty(RevisionCategory::Ingredient, RevisionType::Add)
            .violations()
            .into_iter()
            .map(|v| v.field)
            .collect();
        assert_eq!(
            fields,
            ["ingredientId", "ingredientName", "quantity", "unit", "isOptional"]
        );
    }

    #[test]
    fn build_selects_the_shape() {
        let revision = Revision::build(
            RevisionCategory::Step,
            RevisionType::Delete,
            RevisionFields {
                step_id: Some(3),
                step_number: Some(2),
                instruction: Some("Remove from heat".into()),
                optional: Some(true),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(
            revision,
            Revision::StepDelete(StepSnapshot::new(3, 2, "Remove from heat", true))
        );
    }

    #[test]
    fn build_rejects_fields_of_another_shape() {
        let err = Revision::build(
            RevisionCategory::Ingredient,
            RevisionType::Add,
            RevisionFields {
                ingredient_id: Some(1),
                step_number: Some(2),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            RevisionError::ForeignField {
                category: RevisionCategory::Ingredient,
                revision_type: RevisionType::Add,
                field: "stepNumber",
            }
        );
        let err = Revision::build(
            RevisionCategory::Step,
            RevisionType::Update,
            RevisionFields {
                ingredient_field: Some(IngredientField::Unit),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, RevisionError::ForeignField { field: "changedField", .. }));
    }

    #[test]
    fn typed_changes() {
        let unit = IngredientUpdate::new(
            1,
            "Flour",
            IngredientField::Unit,
            IngredientUnit::Cup,
            IngredientUnit::Tbsp,
        );
        assert_eq!(
            unit.change(),
            Some(IngredientChange::Unit(IngredientUnit::Cup, IngredientUnit::Tbsp))
        );
        let mislabelled =
            IngredientUpdate::new(1, "Flour", IngredientField::Quantity, "CUP", "TBSP");
        assert_eq!(mislabelled.change(), None);
        let timer = StepUpdate::new(1, 1, StepField::Timer, 300, 600);
        assert_eq!(timer.change(), Some(StepChange::Timer(300, 600)));
    }

    #[test]
    fn equality_is_structural() {
        let a = Revision::StepUpdate(StepUpdate::new(1, 1, StepField::Instruction, "Old", "New"));
        let b = Revision::StepUpdate(StepUpdate::new(1, 1, StepField::Instruction, "Old", "New"));
        let c = Revision::StepUpdate(StepUpdate::new(2, 2, StepField::Timer, 300, 600));
        assert_eq!(a, b);
        assert_ne!(a, c);
        // Same payload, different tag pair.
        assert_ne!(
            Revision::IngredientAdd(flour()),
            Revision::IngredientDelete(flour())
        );
    }
}
