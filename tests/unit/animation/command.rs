use super::*;
use crate::foundation::core::Vec2;

fn fade(easing: Ease, start: f64, end: f64, from: f64, to: f64) -> Command<f64> {
    Command::new(CommandKind::Fade, easing, start, end, from, to).unwrap()
}

#[test]
fn endpoints_match_values_for_every_easing() {
    for ease in Ease::ALL {
        let c = fade(ease, 100.0, 300.0, 0.25, 0.75);
        assert_eq!(c.value_at(100.0).unwrap(), 0.25, "{ease:?}");
        assert_eq!(c.value_at(300.0).unwrap(), 0.75, "{ease:?}");
    }
}

#[test]
fn holds_outside_range() {
    let c = fade(Ease::Linear, 0.0, 10.0, 1.0, 3.0);
    assert_eq!(c.value_at(-50.0).unwrap(), 1.0);
    assert_eq!(c.value_at(50.0).unwrap(), 3.0);
    assert_eq!(c.value_at(5.0).unwrap(), 2.0);
}

#[test]
fn zero_duration_yields_end_value_from_start_on() {
    let c = fade(Ease::OutBack, 10.0, 10.0, 0.0, 1.0);
    assert_eq!(c.duration(), 0.0);
    for t in [10.0, 10.5, 1e9] {
        assert_eq!(c.value_at(t).unwrap(), 1.0);
    }
    assert_eq!(c.value_at(9.0).unwrap(), 0.0);
}

#[test]
fn easing_is_applied_to_progress() {
    let c = fade(Ease::InQuad, 0.0, 10.0, 0.0, 100.0);
    assert_eq!(c.value_at(5.0).unwrap(), 25.0);
}

#[test]
fn rejects_inverted_range() {
    let err = Command::new(CommandKind::Fade, Ease::Linear, 10.0, 5.0, 0.0, 1.0).unwrap_err();
    assert!(matches!(err, StoryboardError::Validation(_)));
}

#[test]
fn ordering_uses_start_end_then_tie_break() {
    let a = fade(Ease::Linear, 0.0, 10.0, 0.0, 1.0).with_cost(5);
    let b = fade(Ease::Linear, 0.0, 10.0, 0.0, 1.0);
    let c = fade(Ease::Linear, 3.0, 4.0, 0.0, 1.0);

    assert_eq!(
        compare_commands::<f64>(&a, 0, &c, 1, TieBreak::Declaration),
        Ordering::Less
    );
    assert_eq!(
        compare_commands::<f64>(&a, 0, &b, 1, TieBreak::Declaration),
        Ordering::Less
    );
    assert_eq!(
        compare_commands::<f64>(&a, 0, &b, 1, TieBreak::CostThenDeclaration),
        Ordering::Greater
    );
}

#[test]
fn writes_osb_line() {
    let settings = ExportSettings::default();
    let c = Command::new(
        CommandKind::Move,
        Ease::Out,
        1000.0,
        2000.4,
        Vec2::new(320.0, 240.0),
        Vec2::new(0.0, 0.5),
    )
    .unwrap();
    let mut s = String::new();
    c.write_osb(&mut s, &settings, 1).unwrap();
    assert_eq!(s, " M,1,1000,2000,320,240,0,0.5\n");
}

#[test]
fn writes_instant_command_without_end_fields() {
    let settings = ExportSettings::default();
    let c = fade(Ease::Linear, 500.0, 500.0, 1.0, 1.0);
    let mut s = String::new();
    c.write_osb(&mut s, &settings, 1).unwrap();
    assert_eq!(s, " F,0,500,,1\n");
}
