use super::*;

#[test]
fn reset_clears_every_counter() {
    let mut stats = FrameStats {
        sprite_count: 3,
        command_count: 9,
        effective_command_count: 4,
        incompatible_commands: true,
        overlapped_commands: true,
        screen_fill: 0.75,
    };
    stats.reset();
    assert_eq!(stats, FrameStats::new());
}

#[test]
fn stats_serialize_with_field_names() {
    let json = FrameStats::new().to_json_pretty().unwrap();
    assert!(json.contains("\"effective_command_count\": 0"));
    assert!(json.contains("\"screen_fill\": 0.0"));
}
