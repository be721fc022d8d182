//! Per-dish aggregation

use indexmap::IndexMap;
use serde::Serialize;

use super::*;

/// Summary of every observation recorded for one dish
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DishAggregate {
    /// Dish name
    pub name: String,
    /// Number of observations
    pub observations: usize,
    /// Mean cost per plate
    pub mean_cost_per_plate: f64,
    /// Mean ingredients cost
    pub mean_total_ingredients_cost: f64,
    /// Sum of plates produced
    pub total_plates: f64,
    /// Sum of plates wasted
    pub plates_wasted: f64,
    /// Sum of earnings
    pub total_earning: f64,
}

impl DishAggregate {
    fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            observations: 0,
            mean_cost_per_plate: 0.0,
            mean_total_ingredients_cost: 0.0,
            total_plates: 0.0,
            plates_wasted: 0.0,
            total_earning: 0.0,
        }
    }

    /// Plates produced on a typical day
    pub fn mean_total_plates(&self) -> f64 {
        self.per_observation(self.total_plates)
    }

    /// Earning on a typical day
    pub fn mean_earning(&self) -> f64 {
        self.per_observation(self.total_earning)
    }

    fn per_observation(&self, total: f64) -> f64 {
        if self.observations == 0 {
            0.0
        } else {
            total / self.observations as f64
        }
    }
}

/// Group observations by dish name
///
/// Keys are sorted lexicographically so the grouping is stable across runs.
pub fn aggregate_by_dish(observations: &[ValidObservation<'_>]) -> IndexMap<String, DishAggregate> {
    let mut groups: IndexMap<String, DishAggregate> = IndexMap::new();

    // Means are accumulated as sums first and divided once at the end
    for obs in observations {
        let agg = groups
            .entry(obs.name.to_string())
            .or_insert_with(|| DishAggregate::empty(obs.name));

        let [cost_per_plate, ingredients_cost, plates, wasted] = obs.numeric;
        agg.observations += 1;
        agg.mean_cost_per_plate += cost_per_plate;
        agg.mean_total_ingredients_cost += ingredients_cost;
        agg.total_plates += plates;
        agg.plates_wasted += wasted;
        agg.total_earning += obs.total_earning;
    }

    for agg in groups.values_mut() {
        let n = agg.observations as f64;
        agg.mean_cost_per_plate /= n;
        agg.mean_total_ingredients_cost /= n;
    }

    groups.sort_keys();
    groups
}
