//! The closed vocabularies every revision is described with.
//!
//! Each enum has a stable upper-case textual name. That name is what lands in
//! the JSON blobs and in the record's tag columns, so renaming or adding a
//! variant is a schema change.
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Which sub-entity of a recipe a revision concerns.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RevisionCategory {
    Ingredient,
    Step,
}

impl RevisionCategory {
    pub const ALL: [RevisionCategory; 2] = [RevisionCategory::Ingredient, RevisionCategory::Step];

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Which kind of mutation happened.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RevisionType {
    Add,
    Update,
    Delete,
}

impl RevisionType {
    pub const ALL: [RevisionType; 3] =
        [RevisionType::Add, RevisionType::Update, RevisionType::Delete];

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Every (category, type) pair, in declaration order. Each pair selects exactly one variant shape.
pub fn all_tags() -> impl Iterator<Item = (RevisionCategory, RevisionType)> {
    RevisionCategory::ALL
        .into_iter()
        .flat_map(|category| RevisionType::ALL.into_iter().map(move |ty| (category, ty)))
}

/// The ingredient attributes an update revision can name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IngredientField {
    Quantity,
    Unit,
    OptionalStatus,
    Description,
}

impl IngredientField {
    pub const ALL: [IngredientField; 4] = [
        IngredientField::Quantity,
        IngredientField::Unit,
        IngredientField::OptionalStatus,
        IngredientField::Description,
    ];

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// The step attributes an update revision can name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepField {
    Instruction,
    StepNumber,
    OptionalStatus,
    Timer,
}

impl StepField {
    pub const ALL: [StepField; 4] = [
        StepField::Instruction,
        StepField::StepNumber,
        StepField::OptionalStatus,
        StepField::Timer,
    ];

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Units an ingredient quantity can be measured in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IngredientUnit {
    G,
    Kg,
    Oz,
    Lb,
    Ml,
    L,
    Cup,
    Tbsp,
    Tsp,
    Piece,
    Clove,
    Slice,
    Pinch,
    Can,
    Bottle,
    Packet,
    Unit,
}

impl IngredientUnit {
    pub const ALL: [IngredientUnit; 17] = [
        IngredientUnit::G,
        IngredientUnit::Kg,
        IngredientUnit::Oz,
        IngredientUnit::Lb,
        IngredientUnit::Ml,
        IngredientUnit::L,
        IngredientUnit::Cup,
        IngredientUnit::Tbsp,
        IngredientUnit::Tsp,
        IngredientUnit::Piece,
        IngredientUnit::Clove,
        IngredientUnit::Slice,
        IngredientUnit::Pinch,
        IngredientUnit::Can,
        IngredientUnit::Bottle,
        IngredientUnit::Packet,
        IngredientUnit::Unit,
    ];

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn is_weight(self) -> bool {
        matches!(
            self,
            IngredientUnit::G | IngredientUnit::Kg | IngredientUnit::Oz | IngredientUnit::Lb
        )
    }

    pub fn is_volume(self) -> bool {
        matches!(
            self,
            IngredientUnit::Ml
                | IngredientUnit::L
                | IngredientUnit::Cup
                | IngredientUnit::Tbsp
                | IngredientUnit::Tsp
        )
    }

    pub fn is_count(self) -> bool {
        matches!(
            self,
            IngredientUnit::Piece
                | IngredientUnit::Clove
                | IngredientUnit::Slice
                | IngredientUnit::Unit
        )
    }

    pub fn is_package(self) -> bool {
        matches!(
            self,
            IngredientUnit::Can | IngredientUnit::Bottle | IngredientUnit::Packet
        )
    }

    pub fn is_small_quantity(self) -> bool {
        self == IngredientUnit::Pinch
    }
}
