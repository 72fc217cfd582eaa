#![cfg(feature = "serde")]

use dispatch_dp::dispatch::{DispatchTables, Fleet, Unit};

#[test]
fn fleet_deserializes_from_unit_list() {
    let json = r#"[
        {"a": 0.0, "b": 1.0, "c": 0.0, "pl": 0, "pu": 5},
        {"a": 0.0, "b": 3.0, "c": 0.0, "pl": 0, "pu": 5}
    ]"#;
    let fleet: Fleet = serde_json::from_str(json).unwrap();
    assert_eq!(fleet.p_max(), 10);
    assert_eq!(fleet.units()[1], Unit::new(0.0, 3.0, 0.0, 0, 5).unwrap());
}

#[test]
fn invalid_bounds_are_rejected_on_deserialize() {
    let json = r#"[{"a": 0.0, "b": 1.0, "c": 0.0, "pl": 9, "pu": 5}]"#;
    let err = serde_json::from_str::<Fleet>(json).unwrap_err();
    assert!(err.to_string().contains("lower bound 9 exceeds upper bound 5"));
}

#[test]
fn bare_unit_is_validated_on_deserialize() {
    let err = serde_json::from_str::<Unit>(r#"{"a": 0.0, "b": 1.0, "c": 0.0, "pl": 9, "pu": 5}"#)
        .unwrap_err();
    assert!(err.to_string().contains("lower bound 9 exceeds upper bound 5"));

    let err = serde_json::from_str::<Unit>(r#"{"a": -1e308, "b": 0.0, "c": 0.0, "pl": 0, "pu": 10}"#)
        .unwrap_err();
    assert!(err.to_string().contains("cost at 10 MW"));
}

#[test]
fn unit_round_trips_through_json() {
    let unit = Unit::new(0.5, 2.0, 100.0, 10, 50).unwrap();
    let json = serde_json::to_string(&unit).unwrap();
    assert_eq!(serde_json::from_str::<Unit>(&json).unwrap(), unit);
}

#[test]
fn dispatch_serializes_allocation() {
    let fleet = Fleet::new(vec![
        Unit::new(0.0, 1.0, 0.0, 0, 5).unwrap(),
        Unit::new(0.0, 3.0, 0.0, 0, 5).unwrap(),
    ])
    .unwrap();
    let d = DispatchTables::solve(&fleet).dispatch(7).unwrap().unwrap();
    let value = serde_json::to_value(&d).unwrap();
    assert_eq!(value["demand"], 7);
    assert_eq!(value["cost"], 11.0);
    assert_eq!(value["allocation"], serde_json::json!([5, 2]));
}
