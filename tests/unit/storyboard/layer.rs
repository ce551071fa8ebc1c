use super::*;
use crate::{animation::ease::Ease, storyboard::sprite::DEFAULT_POSITION};

#[test]
fn get_layer_creates_once() {
    let mut sb = Storyboard::new();
    sb.get_layer("Main")
        .create_sprite("a.png", Origin::Centre, DEFAULT_POSITION);
    sb.get_layer("Main")
        .create_sprite("b.png", Origin::Centre, DEFAULT_POSITION);
    sb.get_layer("Overlay").set_osb_layer(OsbLayer::Overlay);

    assert_eq!(sb.layers().len(), 2);
    assert_eq!(sb.sprite_count(), 2);
    assert_eq!(sb.layer("Main").map(StoryboardLayer::len), Some(2));
    assert_eq!(
        sb.layer("Overlay").map(StoryboardLayer::osb_layer),
        Some(OsbLayer::Overlay)
    );
}

#[test]
fn duplicate_layers_are_rejected() {
    let mut sb = Storyboard::new();
    sb.push_layer(StoryboardLayer::new("Main", OsbLayer::Background))
        .unwrap();
    let err = sb
        .push_layer(StoryboardLayer::new("Main", OsbLayer::Pass))
        .unwrap_err();
    assert!(matches!(err, StoryboardError::Validation(_)));
}

#[test]
fn sprite_ids_index_their_layer() {
    let mut layer = StoryboardLayer::new("Main", OsbLayer::Foreground);
    let a = layer.create_sprite("a.png", Origin::TopLeft, Vec2::ZERO);
    let b = layer.create_sprite("b.png", Origin::TopLeft, Vec2::ZERO);
    assert_eq!(layer.sprite(a).map(Sprite::texture_path), Some("a.png"));
    assert_eq!(layer.sprite(b).map(Sprite::texture_path), Some("b.png"));
    assert!(layer.sprite(SpriteId(5)).is_none());
    assert!(
        layer
            .require_sprite_mut(SpriteId(5))
            .unwrap_err()
            .is_invalid_operation()
    );
}

#[test]
fn layer_tie_break_reaches_new_sprites() {
    let mut layer =
        StoryboardLayer::new("Main", OsbLayer::Foreground).with_tie_break(TieBreak::CostThenDeclaration);
    let id = layer.create_sprite("a.png", Origin::Centre, DEFAULT_POSITION);
    let sprite = layer.require_sprite_mut(id).unwrap();
    sprite.fade(Ease::Linear, 0.0, 10.0, 0.25, 0.25).unwrap();
    assert_eq!(sprite.opacity_at(5.0), 0.25);
}

#[test]
fn export_groups_layers_by_osb_layer() {
    let mut sb = Storyboard::new();
    {
        let fg = sb.get_layer("Front");
        let id = fg.create_sprite("f.png", Origin::Centre, DEFAULT_POSITION);
        fg.require_sprite_mut(id)
            .unwrap()
            .fade(Ease::Linear, 0.0, 100.0, 1.0, 0.0)
            .unwrap();
    }
    {
        let bg = sb.get_layer("Back");
        bg.set_osb_layer(OsbLayer::Background);
        bg.create_sprite("b.png", Origin::TopLeft, Vec2::ZERO);
    }

    let text = sb.to_osb_string(&ExportSettings::default()).unwrap();
    assert_eq!(
        text,
        "[Events]\n\
         //Background and Video events\n\
         //Storyboard Layer 0 (Background)\n\
         Sprite,Background,TopLeft,\"b.png\",0,0\n\
         //Storyboard Layer 1 (Fail)\n\
         //Storyboard Layer 2 (Pass)\n\
         //Storyboard Layer 3 (Foreground)\n\
         Sprite,Foreground,Centre,\"f.png\",320,240\n\
         \x20F,0,0,100,1,0\n\
         //Storyboard Layer 4 (Overlay)\n\
         //Storyboard Sound Samples\n"
    );
}

#[test]
fn triggers_fan_out_to_every_sprite() {
    let mut sb = Storyboard::new();
    let layer = sb.get_layer("Main");
    for _ in 0..2 {
        let id = layer.create_sprite("a.png", Origin::Centre, DEFAULT_POSITION);
        let s = layer.require_sprite_mut(id).unwrap();
        s.start_trigger_group("Failing", 0.0, 1000.0, 0).unwrap();
        s.fade(Ease::Linear, 0.0, 10.0, 1.0, 0.0).unwrap();
        s.end_group().unwrap();
    }
    assert_eq!(sb.trigger("Failing", 500.0), 2);
    assert_eq!(sb.untrigger("Failing"), 2);
}
