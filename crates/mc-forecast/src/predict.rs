//! Per-dish prediction and best-action selection
//!
//! Each dish is scored on a synthetic "typical day": its mean cost per plate,
//! mean ingredients cost and mean plates produced, with plates wasted fixed
//! to the best-case waste assumption.
//!
//! Two values come out per dish. The display value is floored at zero, since
//! a negative earning is not reported. The unclamped value is what ranks the
//! dishes: if every dish predicts a loss, ranking on clamped values would tie
//! them all at zero and the choice would be arbitrary, while the unclamped
//! ranking still picks the smallest loss.

use mc_core::data::DishAggregate;
use mc_core::features::FeatureSet;
use mc_models::lm::{LinearModel, Matrix};
use tracing::debug;

use crate::error::Result;

/// Predicted earning of one dish
#[derive(Debug, Clone, PartialEq)]
pub struct DishPrediction {
    /// Dish name
    pub dish: String,
    /// Raw model output, used for ranking
    pub unclamped: f64,
    /// Output floored at zero, used for reporting
    pub display: f64,
}

impl DishPrediction {
    fn new(dish: impl Into<String>, unclamped: f64) -> Self {
        Self {
            dish: dish.into(),
            unclamped,
            display: unclamped.max(0.0),
        }
    }
}

/// Scores every retained dish with a fitted model
pub struct Predictor<'a, M> {
    features: &'a FeatureSet,
    model: &'a M,
    waste_assumption: f64,
}

impl<'a, M: LinearModel> Predictor<'a, M> {
    /// Create a predictor over the dishes of `features`
    pub fn new(features: &'a FeatureSet, model: &'a M, waste_assumption: f64) -> Self {
        Self {
            features,
            model,
            waste_assumption,
        }
    }

    /// Numeric features of the typical day for one dish
    pub fn typical_day(&self, aggregate: &DishAggregate) -> [f64; 4] {
        [
            aggregate.mean_cost_per_plate,
            aggregate.mean_total_ingredients_cost,
            aggregate.mean_total_plates(),
            self.waste_assumption,
        ]
    }

    /// Prediction rows in the training layout, one per dish
    pub fn prediction_matrix(&self) -> Result<Matrix> {
        let width = self.features.design.ncols();
        let mut matrix = Matrix::zeros((self.features.aggregates.len(), width));

        for (i, aggregate) in self.features.aggregates.values().enumerate() {
            let row = self
                .features
                .encode_row(&aggregate.name, self.typical_day(aggregate))?;
            matrix.row_mut(i).assign(&row);
        }

        Ok(matrix)
    }

    /// Predict every dish, in dish order
    pub fn predict_all(&self) -> Result<Vec<DishPrediction>> {
        let matrix = self.prediction_matrix()?;
        let values = self.model.predict(&matrix)?;

        let predictions: Vec<DishPrediction> = self
            .features
            .aggregates
            .keys()
            .zip(values.iter())
            .map(|(dish, &value)| DishPrediction::new(dish.as_str(), value))
            .collect();

        for prediction in &predictions {
            debug!(
                dish = %prediction.dish,
                unclamped = prediction.unclamped,
                display = prediction.display,
                "predicted earning"
            );
        }

        Ok(predictions)
    }
}

/// Dish with the highest unclamped prediction; the first one wins a tie
pub fn best_action(predictions: &[DishPrediction]) -> Option<&DishPrediction> {
    predictions.iter().reduce(|best, candidate| {
        if candidate.unclamped.total_cmp(&best.unclamped).is_gt() {
            candidate
        } else {
            best
        }
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use mc_core::data::Observation;
    use mc_core::features::FeatureBuilder;
    use mc_models::lm;

    use super::*;

    fn day(name: &str, earning: f64) -> Observation {
        Observation::new(name, earning)
            .with_cost_per_plate(3.0)
            .with_total_ingredients_cost(30.0)
            .with_total_plates(10.0)
            .with_plates_wasted(1.0)
    }

    #[test]
    fn test_typical_day_uses_mean_plates() {
        let observations = vec![
            day("Soup", 100.0).with_total_plates(20.0),
            day("Soup", 150.0).with_total_plates(25.0),
        ];
        let features = FeatureBuilder::new().build(&observations).unwrap();
        let model = lm(&features.design).unwrap();
        let predictor = Predictor::new(&features, &model, 1.0);

        let row = predictor.typical_day(&features.aggregates["Soup"]);
        assert_eq!(row, [3.0, 30.0, 22.5, 1.0]);
    }

    #[test]
    fn test_predict_all_clamps_display() {
        let observations = vec![
            day("Gain", 40.0),
            day("Gain", 60.0),
            day("Loss", -20.0),
            day("Loss", -40.0),
        ];
        let features = FeatureBuilder::new().build(&observations).unwrap();
        let model = lm(&features.design).unwrap();

        let predictions = Predictor::new(&features, &model, 1.0)
            .predict_all()
            .unwrap();

        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].dish, "Gain");
        assert_abs_diff_eq!(predictions[0].unclamped, 50.0, epsilon = 1e-8);
        assert_abs_diff_eq!(predictions[0].display, 50.0, epsilon = 1e-8);
        assert_eq!(predictions[1].dish, "Loss");
        assert_abs_diff_eq!(predictions[1].unclamped, -30.0, epsilon = 1e-8);
        assert_eq!(predictions[1].display, 0.0);
    }

    #[test]
    fn test_best_action_ranks_unclamped_values() {
        let predictions = vec![
            DishPrediction::new("Deep", -50.0),
            DishPrediction::new("Shallow", -10.0),
            DishPrediction::new("Middle", -30.0),
        ];

        // All display values tie at zero
        assert!(predictions.iter().all(|p| p.display == 0.0));

        let best = best_action(&predictions).unwrap();
        assert_eq!(best.dish, "Shallow");
        assert_eq!(best.unclamped, -10.0);
    }

    #[test]
    fn test_best_action_tie_keeps_first() {
        let predictions = vec![
            DishPrediction::new("A", 5.0),
            DishPrediction::new("B", 5.0),
        ];
        assert_eq!(best_action(&predictions).unwrap().dish, "A");
    }

    #[test]
    fn test_best_action_empty() {
        assert!(best_action(&[]).is_none());
    }
}
