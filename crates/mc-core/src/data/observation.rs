//! Observation records
//!
//! An observation is one dish's record for one day. Raw history items are
//! validated once here, so the rest of the pipeline never deals with
//! loosely-typed fields.

use serde::Deserialize;

/// Names of the numeric operational features, in design-matrix order
pub const NUMERIC_FEATURES: [&str; 4] = [
    "costPerPlate",
    "totalIngredientsCost",
    "totalPlates",
    "platesWasted",
];

/// One dish's recorded metrics for one day
///
/// Plate counts are held as `f64` since they enter the design matrix
/// unchanged. A missing `name` or `total_earning` marks the observation as
/// unusable for training; see [`Observation::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Dish identity
    pub name: Option<String>,
    /// Cost of one plate (defaults to 0)
    pub cost_per_plate: f64,
    /// Ingredient spend for the day (defaults to 0)
    pub total_ingredients_cost: f64,
    /// Plates produced (defaults to 0)
    pub total_plates: f64,
    /// Plates thrown away (defaults to 0)
    pub plates_wasted: f64,
    /// Earning for the day; may be negative
    pub total_earning: Option<f64>,
}

impl Observation {
    /// Create an observation with a name and earning, all other fields zero
    pub fn new(name: impl Into<String>, total_earning: f64) -> Self {
        Self {
            name: Some(name.into()),
            cost_per_plate: 0.0,
            total_ingredients_cost: 0.0,
            total_plates: 0.0,
            plates_wasted: 0.0,
            total_earning: Some(total_earning),
        }
    }

    /// Set the cost per plate
    pub fn with_cost_per_plate(mut self, value: f64) -> Self {
        self.cost_per_plate = value;
        self
    }

    /// Set the total ingredients cost
    pub fn with_total_ingredients_cost(mut self, value: f64) -> Self {
        self.total_ingredients_cost = value;
        self
    }

    /// Set the number of plates produced
    pub fn with_total_plates(mut self, value: f64) -> Self {
        self.total_plates = value;
        self
    }

    /// Set the number of plates wasted
    pub fn with_plates_wasted(mut self, value: f64) -> Self {
        self.plates_wasted = value;
        self
    }

    /// Numeric features in [`NUMERIC_FEATURES`] order
    pub fn numeric_features(&self) -> [f64; 4] {
        [
            self.cost_per_plate,
            self.total_ingredients_cost,
            self.total_plates,
            self.plates_wasted,
        ]
    }

    /// Borrow this observation as a training row, if it has a name and an earning
    pub fn validate(&self) -> Option<ValidObservation<'_>> {
        let name = self.name.as_deref()?;
        let total_earning = self.total_earning?;

        Some(ValidObservation {
            name,
            numeric: self.numeric_features(),
            total_earning,
        })
    }
}

/// An observation that carries both a dish name and an earning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidObservation<'a> {
    pub name: &'a str,
    pub numeric: [f64; 4],
    pub total_earning: f64,
}

/// One day of the raw history file
#[derive(Debug, Deserialize)]
pub(crate) struct RawDay {
    #[serde(default)]
    pub(crate) items: Option<Vec<RawItem>>,
}

/// One item of a raw day record
///
/// An absent `totalEarning` counts as zero while an explicit `null` stays
/// absent, so that such rows are dropped before training.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawItem {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    cost_per_plate: Option<f64>,
    #[serde(default)]
    total_ingredients_cost: Option<f64>,
    #[serde(default)]
    total_plates: Option<f64>,
    #[serde(default)]
    plates_wasted: Option<f64>,
    #[serde(default = "absent_earning")]
    total_earning: Option<f64>,
}

fn absent_earning() -> Option<f64> {
    Some(0.0)
}

impl From<RawItem> for Observation {
    fn from(raw: RawItem) -> Self {
        Self {
            name: raw.name,
            cost_per_plate: raw.cost_per_plate.unwrap_or(0.0),
            total_ingredients_cost: raw.total_ingredients_cost.unwrap_or(0.0),
            total_plates: raw.total_plates.unwrap_or(0.0),
            plates_wasted: raw.plates_wasted.unwrap_or(0.0),
            total_earning: raw.total_earning,
        }
    }
}
