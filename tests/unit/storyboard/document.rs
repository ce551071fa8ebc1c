use super::*;

const DOC: &str = r#"{
  "layers": [
    {
      "name": "Main",
      "sprites": [
        {
          "path": "sb/dot.png",
          "commands": [
            { "kind": "Fade", "start": 0, "end": 1000, "from": [0], "to": [1] },
            { "kind": "Move", "easing": "Out", "start": 0, "end": 1000, "from": [0, 0], "to": [640, 480] },
            { "kind": "Color", "start": 0, "from": [1, 0, 0] },
            { "kind": "Parameter", "start": 0, "end": 500, "param": "AdditiveBlending" }
          ],
          "groups": [
            { "type": "loop", "start": 1000, "count": 2, "commands": [
              { "kind": "Scale", "start": 0, "end": 100, "from": [1], "to": [2] }
            ] },
            { "type": "trigger", "name": "HitSoundWhistle", "start": 0, "end": 3000, "commands": [
              { "kind": "Rotate", "start": 0, "end": 100, "from": [0], "to": [1] }
            ] }
          ]
        }
      ]
    },
    {
      "name": "Back",
      "osb_layer": "Background",
      "sprites": [
        {
          "path": "sb/anim.png",
          "origin": "TopLeft",
          "position": [0, 0],
          "animation": { "frame_count": 3, "frame_delay": 100 }
        }
      ]
    }
  ]
}"#;

#[test]
fn document_builds_layers_and_sprites() {
    let doc = StoryboardDocument::from_json_str(DOC).unwrap();
    let sb = doc.build().unwrap();

    assert_eq!(sb.layers().len(), 2);
    let main = sb.layer("Main").unwrap();
    assert_eq!(main.osb_layer(), OsbLayer::Foreground);
    let s = &main.sprites()[0];
    assert_eq!(s.origin(), Origin::Centre);
    assert_eq!(s.initial_position(), DEFAULT_POSITION);
    assert_eq!(s.opacity_at(500.0), 0.5);
    assert!(s.additive_at(100.0));
    assert_eq!(s.color_at(10.0), CommandColor::new(1.0, 0.0, 0.0));
    assert_eq!(s.scale_at(1150.0), Vec2::new(1.5, 1.5));
    assert_eq!(s.end_time(), Some(1200.0));

    let back = sb.layer("Back").unwrap();
    assert_eq!(back.osb_layer(), OsbLayer::Background);
    let spec = back.sprites()[0].animation_spec().copied().unwrap();
    assert_eq!(spec.frame_count(), 3);
    assert_eq!(spec.loop_type(), LoopType::LoopForever);
}

#[test]
fn wrong_component_count_is_rejected() {
    let doc = StoryboardDocument::from_json_str(
        r#"{ "layers": [ { "name": "L", "sprites": [ { "path": "a.png",
            "commands": [ { "kind": "Move", "start": 0, "from": [1] } ] } ] } ] }"#,
    )
    .unwrap();
    let err = doc.build().unwrap_err();
    assert!(matches!(err, StoryboardError::Validation(_)));
    assert!(err.to_string().contains("expects 2 component(s)"));
}

#[test]
fn reversed_command_window_is_rejected() {
    let c = CommandDoc {
        kind: CommandKind::Fade,
        easing: Ease::Linear,
        start: 100.0,
        end: Some(50.0),
        from: vec![1.0],
        to: None,
        param: None,
    };
    assert!(matches!(
        c.to_command().unwrap_err(),
        StoryboardError::Validation(_)
    ));
}

#[test]
fn parameter_without_param_is_rejected_on_build() {
    let doc = StoryboardDocument::from_json_str(
        r#"{ "layers": [ { "name": "L", "sprites": [ { "path": "a.png",
            "commands": [ { "kind": "Parameter", "start": 0, "end": 10 } ] } ] } ] }"#,
    )
    .unwrap();
    assert!(doc.build().is_err());
}

#[test]
fn duplicate_layer_names_fail() {
    let doc = StoryboardDocument {
        layers: vec![
            LayerDoc {
                name: "A".into(),
                osb_layer: OsbLayer::Foreground,
                tie_break: TieBreak::Declaration,
                sprites: Vec::new(),
            },
            LayerDoc {
                name: "A".into(),
                osb_layer: OsbLayer::Overlay,
                tie_break: TieBreak::Declaration,
                sprites: Vec::new(),
            },
        ],
    };
    assert!(doc.build().is_err());
}

#[test]
fn malformed_json_maps_to_serde_error() {
    let err = StoryboardDocument::from_json_str("{ \"layers\": 3 }").unwrap_err();
    assert!(matches!(err, StoryboardError::Serde(_)));
}

#[test]
fn document_serializes_back_to_json() {
    let doc = StoryboardDocument::from_json_str(DOC).unwrap();
    let text = doc.to_json_string().unwrap();
    let again = StoryboardDocument::from_json_str(&text).unwrap();
    assert_eq!(again.layers.len(), 2);
    assert_eq!(again.layers[0].sprites[0].groups.len(), 2);
}
