use super::*;

#[test]
fn defaults_are_valid() {
    let s = DrawSettings::default();
    s.validate().unwrap();
    assert_eq!(s.bounds_scaling(), 1.0);
}

#[test]
fn partial_json_fills_defaults() {
    let s: DrawSettings = serde_json::from_str(r#"{ "dim_factor": 0.5 }"#).unwrap();
    assert_eq!(s.dim_factor, 0.5);
    assert_eq!(s.opacity, 1.0);
}

#[test]
fn out_of_range_values_fail_validation() {
    let s = DrawSettings {
        opacity: 1.5,
        ..DrawSettings::default()
    };
    assert!(matches!(
        s.validate().unwrap_err(),
        StoryboardError::Validation(_)
    ));
}
