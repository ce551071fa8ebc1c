use super::*;

#[test]
fn values_are_trimmed() {
    let s = ExportSettings::default();
    assert_eq!(s.format_value(1.0), "1");
    assert_eq!(s.format_value(0.12345), "0.1235");
    assert_eq!(s.format_value(-0.00001), "0");
    assert_eq!(s.format_value(2.5), "2.5");
}

#[test]
fn times_round_unless_float() {
    let mut s = ExportSettings::default();
    assert_eq!(s.format_time(1000.6), "1001");
    assert_eq!(s.format_time(-0.2), "0");
    s.use_float_for_time = true;
    assert_eq!(s.format_time(1000.25), "1000.25");
}
