//! Derive revisions from an edit of a recipe's ingredient or step list.
//!
//! Nothing is persisted here. The caller decides whether to wrap each result in
//! a [`crate::RevisionRecord`] and save it.
use rust_decimal::Decimal;

use crate::revision::{IngredientSnapshot, IngredientUpdate, Revision, StepSnapshot, StepUpdate};
use crate::taxonomy::{IngredientField, IngredientUnit, RevisionCategory, RevisionType, StepField};

/// One ingredient as it sits in a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientLine {
    pub ingredient_id: i64,
    pub name: String,
    pub quantity: Decimal,
    pub unit: IngredientUnit,
    pub is_optional: bool,
    pub description: Option<String>,
}

/// One step as it sits in a recipe. Steps are identified by their number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepLine {
    pub step_id: i64,
    pub step_number: i32,
    pub instruction: String,
    pub optional: bool,
    pub timer_seconds: Option<i32>,
}

impl IngredientLine {
    fn matches(&self, other: &IngredientLine) -> bool {
        self.ingredient_id == other.ingredient_id
            || self.name.to_lowercase() == other.name.to_lowercase()
    }

    fn snapshot(&self) -> IngredientSnapshot {
        let snapshot = IngredientSnapshot::new(
            self.ingredient_id,
            self.name.as_str(),
            self.quantity,
            self.unit,
            self.is_optional,
        );
        match &self.description {
            Some(description) => snapshot.with_description(description.as_str()),
            None => snapshot,
        }
    }
}

impl StepLine {
    fn snapshot(&self) -> StepSnapshot {
        StepSnapshot::new(self.step_id, self.step_number, self.instruction.as_str(), self.optional)
            .with_timer_seconds(self.timer_seconds)
    }
}

/// Revisions that turn `current` into `proposed`.
///
/// Removed lines come first, in `current` order. Then, in `proposed` order, an
/// add for every new line and one update per changed field of a kept line.
pub fn ingredient_changes(
    current: &[IngredientLine],
    proposed: &[IngredientLine],
) -> Vec<Revision> {
    let mut revisions: Vec<Revision> = current
        .iter()
        .filter(|old| !proposed.iter().any(|new| new.matches(old)))
        .map(|old| Revision::IngredientDelete(old.snapshot()))
        .collect();

    for new in proposed {
        match current.iter().find(|old| old.matches(new)) {
            None => revisions.push(Revision::IngredientAdd(new.snapshot())),
            Some(old) => revisions.extend(ingredient_updates(old, new)),
        }
    }
    revisions
}

fn ingredient_updates(old: &IngredientLine, new: &IngredientLine) -> Vec<Revision> {
    let update = |field, previous: crate::FieldValue, next: crate::FieldValue| {
        Revision::IngredientUpdate(IngredientUpdate::new(
            old.ingredient_id,
            old.name.as_str(),
            field,
            previous,
            next,
        ))
    };

    let mut updates = Vec::new();
    if old.quantity != new.quantity {
        updates.push(update(IngredientField::Quantity, old.quantity.into(), new.quantity.into()));
    }
    if old.unit != new.unit {
        updates.push(update(IngredientField::Unit, old.unit.into(), new.unit.into()));
    }
    if old.is_optional != new.is_optional {
        updates.push(update(
            IngredientField::OptionalStatus,
            old.is_optional.into(),
            new.is_optional.into(),
        ));
    }
    // A missing description reads as empty text.
    let (old_description, new_description) = (
        old.description.as_deref().unwrap_or_default(),
        new.description.as_deref().unwrap_or_default(),
    );
    if old_description != new_description {
        updates.push(update(
            IngredientField::Description,
            old_description.into(),
            new_description.into(),
        ));
    }
    updates
}

/// Revisions that turn `current` into `proposed`, matching steps by number.
/// Ordering follows [`ingredient_changes`].
pub fn step_changes(current: &[StepLine], proposed: &[StepLine]) -> Vec<Revision> {
    let mut revisions: Vec<Revision> = current
        .iter()
        .filter(|old| !proposed.iter().any(|new| new.step_number == old.step_number))
        .map(|old| Revision::StepDelete(old.snapshot()))
        .collect();

    for new in proposed {
        match current.iter().find(|old| old.step_number == new.step_number) {
            None => revisions.push(Revision::StepAdd(new.snapshot())),
            Some(old) => revisions.extend(step_updates(old, new)),
        }
    }
    revisions
}

fn step_updates(old: &StepLine, new: &StepLine) -> Vec<Revision> {
    let update = |field, previous: crate::FieldValue, next: crate::FieldValue| {
        Revision::StepUpdate(StepUpdate::new(old.step_id, new.step_number, field, previous, next))
    };

    let mut updates = Vec::new();
    if old.instruction != new.instruction {
        updates.push(update(
            StepField::Instruction,
            old.instruction.as_str().into(),
            new.instruction.as_str().into(),
        ));
    }
    if old.optional != new.optional {
        updates.push(update(StepField::OptionalStatus, old.optional.into(), new.optional.into()));
    }
    // No timer is recorded as zero seconds.
    let (old_timer, new_timer) = (old.timer_seconds.unwrap_or(0), new.timer_seconds.unwrap_or(0));
    if old_timer != new_timer {
        updates.push(update(StepField::Timer, old_timer.into(), new_timer.into()));
    }
    updates
}

/// The stock comment stored alongside a derived revision.
pub fn change_comment(revision: &Revision) -> &'static str {
    match revision {
        Revision::IngredientAdd(_) => "New ingredient added to recipe",
        Revision::IngredientDelete(_) => "Ingredient removed from recipe",
        Revision::StepAdd(_) => "New step added to recipe",
        Revision::StepDelete(_) => "Step removed from recipe",
        Revision::IngredientUpdate(update) => match update.changed_field {
            Some(IngredientField::Quantity) => "Ingredient quantity updated",
            Some(IngredientField::Unit) => "Ingredient unit updated",
            Some(IngredientField::OptionalStatus) => "Ingredient optional flag updated",
            Some(IngredientField::Description) => "Ingredient description updated",
            None => "Ingredient updated",
        },
        Revision::StepUpdate(update) => match update.changed_field {
            Some(StepField::Instruction) => "Step instruction updated",
            Some(StepField::StepNumber) => "Step number updated",
            Some(StepField::OptionalStatus) => "Step optional flag updated",
            Some(StepField::Timer) => "Step timer updated",
            None => "Step updated",
        },
    }
}

/// Count of revisions per tag, in [`crate::taxonomy::all_tags`] order, skipping empty tags.
pub fn summarize(revisions: &[Revision]) -> Vec<((RevisionCategory, RevisionType), usize)> {
    crate::taxonomy::all_tags()
        .map(|tag| (tag, revisions.iter().filter(|r| r.tag() == tag).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::revision::IngredientChange;
    use crate::revision::StepChange;

    fn ingredient(id: i64, name: &str, quantity: Decimal, unit: IngredientUnit) -> IngredientLine {
        IngredientLine {
            ingredient_id: id,
            name: name.to_string(),
            quantity,
            unit,
            is_optional: false,
            description: None,
        }
    }

    fn step(id: i64, number: i32, instruction: &str) -> StepLine {
        StepLine {
            step_id: id,
            step_number: number,
            instruction: instruction.to_string(),
            optional: false,
            timer_seconds: None,
        }
    }

    #[test]
    fn unchanged_lists_produce_nothing() {
        let flour = ingredient(1, "Flour", Decimal::new(2, 0), IngredientUnit::Cup);
        assert!(ingredient_changes(&[flour.clone()], &[flour]).is_empty());
        let mix = step(10, 1, "Mix");
        assert!(step_changes(&[mix.clone()], &[mix]).is_empty());
    }

    #[test]
    fn deletes_come_before_adds() {
        let flour = ingredient(1, "Flour", Decimal::new(2, 0), IngredientUnit::Cup);
        let sugar = ingredient(2, "Sugar", Decimal::new(100, 0), IngredientUnit::G);
        let revisions = ingredient_changes(&[flour], &[sugar]);
        let tags: Vec<_> = revisions.iter().map(Revision::tag).collect();
        assert_eq!(
            tags,
            vec![
                (RevisionCategory::Ingredient, RevisionType::Delete),
                (RevisionCategory::Ingredient, RevisionType::Add),
            ]
        );
        assert_eq!(revisions[0].subject_id(), Some(1));
        assert_eq!(revisions[1].subject_id(), Some(2));
        assert!(revisions.iter().all(Revision::is_valid));
    }

    #[test]
    fn ingredients_match_by_name_ignoring_case() {
        let old = ingredient(1, "Flour", Decimal::new(2, 0), IngredientUnit::Cup);
        let new = IngredientLine {
            ingredient_id: 99,
            name: "flour".to_string(),
            ..old.clone()
        };
        assert!(ingredient_changes(&[old], &[new]).is_empty());
    }

    #[test]
    fn one_update_per_changed_ingredient_field() {
        let old = ingredient(1, "Flour", Decimal::new(2, 0), IngredientUnit::Cup);
        let new = IngredientLine {
            quantity: Decimal::new(250, 0),
            unit: IngredientUnit::G,
            is_optional: true,
            description: Some("sifted".to_string()),
            ..old.clone()
        };
        let revisions = ingredient_changes(&[old], &[new]);
        let changes: Vec<_> = revisions
            .iter()
            .map(|r| match r {
                Revision::IngredientUpdate(update) => update.change(),
                other => panic!("unexpected {:?}", other.tag()),
            })
            .collect();
        assert_eq!(
            changes,
            vec![
                Some(IngredientChange::Quantity(Decimal::new(2, 0), Decimal::new(250, 0))),
                Some(IngredientChange::Unit(IngredientUnit::Cup, IngredientUnit::G)),
                Some(IngredientChange::OptionalStatus(false, true)),
                Some(IngredientChange::Description(String::new(), "sifted".to_string())),
            ]
        );
        assert!(revisions.iter().all(Revision::is_valid));
        assert_eq!(change_comment(&revisions[1]), "Ingredient unit updated");
    }

    #[test]
    fn equal_quantities_with_different_scale_are_unchanged() {
        let old = ingredient(1, "Flour", Decimal::new(25, 1), IngredientUnit::Cup);
        let new = IngredientLine {
            quantity: Decimal::new(250, 2),
            ..old.clone()
        };
        assert!(ingredient_changes(&[old], &[new]).is_empty());
    }

    #[test]
    fn steps_match_by_number() {
        let current = [step(10, 1, "Mix"), step(11, 2, "Bake")];
        let proposed = [
            StepLine {
                timer_seconds: Some(1800),
                ..step(11, 2, "Bake until golden")
            },
            step(12, 3, "Cool"),
        ];
        let revisions = step_changes(&current, &proposed);
        let tags: Vec<_> = revisions.iter().map(Revision::tag).collect();
        assert_eq!(
            tags,
            vec![
                (RevisionCategory::Step, RevisionType::Delete),
                (RevisionCategory::Step, RevisionType::Update),
                (RevisionCategory::Step, RevisionType::Update),
                (RevisionCategory::Step, RevisionType::Add),
            ]
        );
        let Revision::StepUpdate(timer) = &revisions[2] else {
            panic!("expected a step update");
        };
        assert_eq!(timer.change(), Some(StepChange::Timer(0, 1800)));
        assert_eq!(change_comment(&revisions[0]), "Step removed from recipe");
        assert_eq!(change_comment(&revisions[3]), "New step added to recipe");
        assert!(revisions.iter().all(Revision::is_valid));

        let summary = summarize(&revisions);
        assert_eq!(
            summary,
            vec![
                ((RevisionCategory::Step, RevisionType::Add), 1),
                ((RevisionCategory::Step, RevisionType::Update), 2),
                ((RevisionCategory::Step, RevisionType::Delete), 1),
            ]
        );
    }
}
