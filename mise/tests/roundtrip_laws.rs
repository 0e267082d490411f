use proptest::prelude::*;
use rust_decimal::Decimal;

use mise::{
    codec,
    errors::SerializationErrorKind,
    taxonomy::all_tags,
    FieldValue, IngredientField, IngredientSnapshot, IngredientUnit, IngredientUpdate, Revision,
    Rule, StepField, StepSnapshot, StepUpdate,
};

fn quantity() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000, 0u32..6).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn unit() -> impl Strategy<Value = IngredientUnit> {
    prop::sample::select(IngredientUnit::ALL.to_vec())
}

fn ingredient_snapshot() -> impl Strategy<Value = IngredientSnapshot> {
    (
        1i64..100_000,
        "[A-Za-z][A-Za-z ]{0,15}",
        quantity(),
        unit(),
        any::<bool>(),
        prop::option::of("[a-z ,]{0,20}"),
    )
        .prop_map(|(id, name, quantity, unit, optional, description)| {
            let snapshot = IngredientSnapshot::new(id, name, quantity, unit, optional);
            match description {
                Some(description) => snapshot.with_description(description),
                None => snapshot,
            }
        })
}

fn step_snapshot() -> impl Strategy<Value = StepSnapshot> {
    (
        1i64..100_000,
        1i32..200,
        "[A-Za-z][A-Za-z .]{0,40}",
        any::<bool>(),
        prop::option::of(0i32..86_400),
    )
        .prop_map(|(id, number, instruction, optional, timer)| {
            StepSnapshot::new(id, number, instruction, optional).with_timer_seconds(timer)
        })
}

fn ingredient_update() -> impl Strategy<Value = IngredientUpdate> {
    let values = prop_oneof![
        (Just(IngredientField::Quantity), quantity(), quantity())
            .prop_map(|(f, a, b)| (f, FieldValue::from(a), FieldValue::from(b))),
        (Just(IngredientField::Unit), unit(), unit())
            .prop_map(|(f, a, b)| (f, FieldValue::from(a), FieldValue::from(b))),
        (Just(IngredientField::OptionalStatus), any::<bool>())
            .prop_map(|(f, a)| (f, FieldValue::from(a), FieldValue::from(!a))),
        (Just(IngredientField::Description), "[a-z]{0,12}", "[a-z]{0,12}")
            .prop_map(|(f, a, b)| (f, FieldValue::from(a), FieldValue::from(b))),
    ];
    (1i64..100_000, "[A-Za-z][A-Za-z ]{0,15}", values)
        .prop_filter("values must differ", |(_, _, (_, a, b))| a != b)
        .prop_map(|(id, name, (field, a, b))| IngredientUpdate::new(id, name, field, a, b))
}

fn step_update() -> impl Strategy<Value = StepUpdate> {
    let values = prop_oneof![
        (Just(StepField::Instruction), "[A-Za-z ]{1,20}", "[A-Za-z ]{1,20}")
            .prop_map(|(f, a, b)| (f, FieldValue::from(a), FieldValue::from(b))),
        (Just(StepField::StepNumber), 1i32..100, 1i32..100)
            .prop_map(|(f, a, b)| (f, FieldValue::from(a), FieldValue::from(b))),
        (Just(StepField::OptionalStatus), any::<bool>())
            .prop_map(|(f, a)| (f, FieldValue::from(a), FieldValue::from(!a))),
        (Just(StepField::Timer), 0i32..86_400, 0i32..86_400)
            .prop_map(|(f, a, b)| (f, FieldValue::from(a), FieldValue::from(b))),
    ];
    (1i64..100_000, 1i32..200, values)
        .prop_filter("values must differ", |(_, _, (_, a, b))| a != b)
        .prop_map(|(id, number, (field, a, b))| StepUpdate::new(id, number, field, a, b))
}

fn valid_revision() -> impl Strategy<Value = Revision> {
    prop_oneof![
        ingredient_snapshot().prop_map(Revision::IngredientAdd),
        ingredient_snapshot().prop_map(Revision::IngredientDelete),
        ingredient_update().prop_map(Revision::IngredientUpdate),
        step_snapshot().prop_map(Revision::StepAdd),
        step_snapshot().prop_map(Revision::StepDelete),
        step_update().prop_map(Revision::StepUpdate),
    ]
}

fn knock_out<T>(value: Option<T>, drop: bool) -> Option<T> {
    if drop {
        None
    } else {
        value
    }
}

proptest! {
    #[test]
    fn valid_revisions_survive_a_round_trip(revision in valid_revision()) {
        prop_assert!(revision.is_valid(), "{:?}", revision.violations());
        let (category, revision_type) = revision.tag();
        let text = codec::encode(&revision).unwrap();
        let decoded = codec::decode(category, revision_type, &text).unwrap();
        prop_assert_eq!(decoded, revision);
    }

    #[test]
    fn decoding_under_any_other_tag_fails(revision in valid_revision()) {
        let text = codec::encode(&revision).unwrap();
        for (category, revision_type) in all_tags().filter(|tag| *tag != revision.tag()) {
            let err = codec::decode(category, revision_type, &text).unwrap_err();
            let is_tag_mismatch = matches!(err.kind, SerializationErrorKind::TagMismatch { .. });
            prop_assert!(is_tag_mismatch, "{:?}", err);
            prop_assert_eq!(err.category, category);
            prop_assert_eq!(err.revision_type, revision_type);
        }
    }

    #[test]
    fn updates_with_equal_values_are_invalid(update in ingredient_update(), step in step_update()) {
        let same = update.previous_value.clone();
        let revision = Revision::IngredientUpdate(update.with_values(same.clone(), same));
        prop_assert!(revision.violations().iter().any(|v| v.rule == Rule::Unchanged));

        let same = step.new_value.clone();
        let revision = Revision::StepUpdate(step.with_values(same.clone(), same));
        prop_assert!(!revision.is_valid());
    }

    #[test]
    fn ingredient_drafts_are_valid_exactly_when_complete(
        snapshot in ingredient_snapshot(),
        drop in prop::array::uniform6(any::<bool>()),
    ) {
        let draft = IngredientSnapshot {
            ingredient_id: knock_out(snapshot.ingredient_id, drop[0]),
            ingredient_name: knock_out(snapshot.ingredient_name, drop[1]),
            quantity: knock_out(snapshot.quantity, drop[2]),
            unit: knock_out(snapshot.unit, drop[3]),
            is_optional: knock_out(snapshot.is_optional, drop[4]),
            description: knock_out(snapshot.description, drop[5]),
        };
        let missing = drop[..5].iter().filter(|d| **d).count();
        let revisions = [Revision::IngredientAdd(draft.clone()), Revision::IngredientDelete(draft)];
        for revision in revisions {
            prop_assert_eq!(revision.violations().len(), missing);
            prop_assert_eq!(revision.is_valid(), missing == 0);

            let (category, revision_type) = revision.tag();
            let text = codec::encode(&revision).unwrap();
            let decoded = codec::decode(category, revision_type, &text);
            if missing == 0 {
                prop_assert_eq!(decoded.unwrap(), revision);
            } else {
                let err = decoded.unwrap_err();
                let is_missing = matches!(err.kind, SerializationErrorKind::MissingField(_));
                prop_assert!(is_missing, "{:?}", err);
            }
        }
    }

    #[test]
    fn step_drafts_are_valid_exactly_when_complete(
        snapshot in step_snapshot(),
        drop in prop::array::uniform5(any::<bool>()),
    ) {
        let draft = StepSnapshot {
            step_id: knock_out(snapshot.step_id, drop[0]),
            step_number: knock_out(snapshot.step_number, drop[1]),
            instruction: knock_out(snapshot.instruction, drop[2]),
            optional: knock_out(snapshot.optional, drop[3]),
            timer_seconds: knock_out(snapshot.timer_seconds, drop[4]),
        };
        let missing = drop[..4].iter().filter(|d| **d).count();
        for revision in [Revision::StepAdd(draft.clone()), Revision::StepDelete(draft)] {
            prop_assert_eq!(revision.violations().len(), missing);
            prop_assert_eq!(revision.is_valid(), missing == 0);
        }
    }

    #[test]
    fn update_drafts_are_valid_exactly_when_complete(
        update in ingredient_update(),
        step in step_update(),
        drop in prop::array::uniform5(any::<bool>()),
    ) {
        let missing = drop.iter().filter(|d| **d).count();
        let ingredient = Revision::IngredientUpdate(IngredientUpdate {
            ingredient_id: knock_out(update.ingredient_id, drop[0]),
            ingredient_name: knock_out(update.ingredient_name, drop[1]),
            changed_field: knock_out(update.changed_field, drop[2]),
            previous_value: knock_out(update.previous_value, drop[3]),
            new_value: knock_out(update.new_value, drop[4]),
        });
        prop_assert_eq!(ingredient.violations().len(), missing);
        prop_assert_eq!(ingredient.is_valid(), missing == 0);

        let step = Revision::StepUpdate(StepUpdate {
            step_id: knock_out(step.step_id, drop[0]),
            step_number: knock_out(step.step_number, drop[1]),
            changed_field: knock_out(step.changed_field, drop[2]),
            previous_value: knock_out(step.previous_value, drop[3]),
            new_value: knock_out(step.new_value, drop[4]),
        });
        prop_assert_eq!(step.violations().len(), missing);
        prop_assert_eq!(step.is_valid(), missing == 0);
    }
}
