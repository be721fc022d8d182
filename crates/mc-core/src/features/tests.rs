//! Tests for the feature builder

use approx::assert_abs_diff_eq;
use ndarray::array;

use super::*;

fn soup(total_plates: f64, plates_wasted: f64, earning: f64) -> Observation {
    Observation::new("Soup", earning)
        .with_cost_per_plate(2.0)
        .with_total_ingredients_cost(10.0)
        .with_total_plates(total_plates)
        .with_plates_wasted(plates_wasted)
}

fn mixed_history() -> Vec<Observation> {
    vec![
        soup(20.0, 2.0, 100.0),
        Observation::new("Pie", 30.0).with_total_plates(5.0),
        soup(25.0, 1.0, 150.0),
        Observation {
            name: None,
            ..Observation::new("", 10.0)
        },
        Observation {
            total_earning: None,
            ..Observation::new("Curry", 0.0)
        },
    ]
}

#[test]
fn test_build_shape() {
    let features = FeatureBuilder::new().build(&mixed_history()).unwrap();

    // Two incomplete rows dropped, two dishes retained
    assert_eq!(features.design.nrows(), 3);
    assert_eq!(features.design.ncols(), 2 + 4);
    assert_eq!(features.design.y.len(), 3);
    assert_eq!(features.dishes(), vec!["Pie", "Soup"]);
}

#[test]
fn test_build_layout() {
    let features = FeatureBuilder::new().build(&mixed_history()).unwrap();
    let design = &features.design;

    assert_eq!(
        design.column_names,
        vec![
            "name_Pie",
            "name_Soup",
            "costPerPlate",
            "totalIngredientsCost",
            "totalPlates",
            "platesWasted"
        ]
    );

    // Rows keep input order
    assert_eq!(
        design.x,
        array![
            [0.0, 1.0, 2.0, 10.0, 20.0, 2.0],
            [1.0, 0.0, 0.0, 0.0, 5.0, 0.0],
            [0.0, 1.0, 2.0, 10.0, 25.0, 1.0],
        ]
    );
    assert_eq!(design.y, array![100.0, 30.0, 150.0]);
}

#[test]
fn test_build_aggregates_follow_encoder_order() {
    let features = FeatureBuilder::new().build(&mixed_history()).unwrap();

    let keys: Vec<&str> = features.aggregates.keys().map(String::as_str).collect();
    assert_eq!(keys, features.dishes());
    assert_abs_diff_eq!(features.aggregates["Soup"].mean_total_plates(), 22.5);
}

#[test]
fn test_build_empty_history() {
    let err = FeatureBuilder::new().build(&[]).unwrap_err();
    assert!(err.is_insufficient_data());
}

#[test]
fn test_build_no_valid_rows() {
    let observations = vec![Observation {
        name: None,
        ..Observation::new("", 1.0)
    }];

    match FeatureBuilder::new().build(&observations).unwrap_err() {
        CoreError::InsufficientData {
            total,
            valid,
            retained_dishes,
        } => {
            assert_eq!(total, 1);
            assert_eq!(valid, 0);
            assert_eq!(retained_dishes, 0);
        }
        other => panic!("Expected InsufficientData, got {other:?}"),
    }
}

#[test]
fn test_min_observations_filters_rare_dishes() {
    let features = FeatureBuilder::new()
        .min_observations(2)
        .build(&mixed_history())
        .unwrap();

    assert_eq!(features.dishes(), vec!["Soup"]);
    assert_eq!(features.design.nrows(), 2);
    assert_eq!(features.design.ncols(), 1 + 4);
}

#[test]
fn test_min_observations_removing_everything() {
    let err = FeatureBuilder::new()
        .min_observations(5)
        .build(&mixed_history())
        .unwrap_err();

    assert!(matches!(
        err,
        CoreError::InsufficientData {
            total: 5,
            valid: 3,
            retained_dishes: 0
        }
    ));
}

#[test]
fn test_min_observations_zero_keeps_everything() {
    let features = FeatureBuilder::new()
        .min_observations(0)
        .build(&mixed_history())
        .unwrap();
    assert_eq!(features.dishes().len(), 2);
}

#[test]
fn test_encode_row() {
    let features = FeatureBuilder::new().build(&mixed_history()).unwrap();

    let row = features.encode_row("Soup", [2.0, 10.0, 22.5, 1.0]).unwrap();
    assert_eq!(row, array![0.0, 1.0, 2.0, 10.0, 22.5, 1.0]);

    // Unseen dish maps to an all-zero indicator block
    let row = features.encode_row("Ramen", [1.0, 1.0, 1.0, 1.0]).unwrap();
    assert_eq!(row, array![0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
}

#[test]
fn test_feature_names() {
    let features = FeatureBuilder::new().build(&mixed_history()).unwrap();
    assert_eq!(
        features.feature_names(),
        vec![
            "name_onehot",
            "costPerPlate",
            "totalIngredientsCost",
            "totalPlates",
            "platesWasted"
        ]
    );
}
