use std::{
    collections::{HashMap, HashSet},
    io,
    path::{Path, PathBuf},
};

use super::*;
use crate::{
    animation::ease::Ease,
    foundation::core::{Origin, Rect},
    storyboard::{layer::OsbLayer, sprite::DEFAULT_POSITION},
};

#[derive(Clone, Copy, Debug, PartialEq)]
struct FakeTexture(Vec2);

impl Texture for FakeTexture {
    fn size(&self) -> Vec2 {
        self.0
    }
}

#[derive(Default)]
struct FakeTextures {
    files: HashMap<PathBuf, Vec2>,
    busy: HashSet<PathBuf>,
    lookups: Vec<PathBuf>,
}

impl FakeTextures {
    fn with(mut self, path: &str, w: f64, h: f64) -> Self {
        self.files.insert(PathBuf::from(path), Vec2::new(w, h));
        self
    }
}

impl TextureProvider for FakeTextures {
    type Texture = FakeTexture;

    fn get(&mut self, path: &Path) -> io::Result<Option<FakeTexture>> {
        self.lookups.push(path.to_path_buf());
        if self.busy.contains(path) {
            return Err(io::Error::other("file in use"));
        }
        Ok(self.files.get(path).copied().map(FakeTexture))
    }
}

#[derive(Default)]
struct Recorder {
    quads: Vec<(f64, f64, Vec2, Vec2, f64, Rgba, BlendMode)>,
}

impl QuadRenderer<FakeTexture> for Recorder {
    fn draw_quad(&mut self, quad: &Quad<'_, FakeTexture>) {
        self.quads.push((
            quad.x,
            quad.y,
            quad.origin,
            quad.scale,
            quad.rotation,
            quad.color,
            quad.blend,
        ));
    }
}

fn settings() -> DrawSettings {
    DrawSettings {
        mapset_path: PathBuf::from("maps"),
        project_asset_path: PathBuf::from("assets"),
        ..DrawSettings::default()
    }
}

fn visible_sprite(path: &str, origin: Origin, position: Vec2) -> Sprite {
    let mut s = Sprite::new(path, origin, position);
    s.fade(Ease::Linear, 0.0, 1000.0, 1.0, 1.0).unwrap();
    s
}

#[test]
fn transparent_sprite_is_counted_but_not_drawn() {
    let mut s = Sprite::new("sb/a.png", Origin::Centre, DEFAULT_POSITION);
    s.fade(Ease::Linear, 0.0, 1000.0, 0.0, 0.0).unwrap();
    s.move_x(Ease::Linear, 0.0, 1000.0, 320.0, 320.0).unwrap();

    let mut textures = FakeTextures::default().with("maps/sb/a.png", 854.0, 480.0);
    let mut renderer = Recorder::default();
    let mut stats = FrameStats::new();
    let outcome = draw_sprite(&s, 500.0, &settings(), &mut textures, &mut renderer, &mut stats);

    assert_eq!(outcome, DrawOutcome::Skipped(SkipReason::Transparent));
    assert!(renderer.quads.is_empty());
    assert_eq!(stats.sprite_count, 1);
    assert_eq!(stats.command_count, 2);
    assert_eq!(stats.effective_command_count, 0);
    assert_eq!(stats.screen_fill, 0.0);
    assert!(textures.lookups.is_empty());
}

#[test]
fn inactive_sprite_leaves_stats_untouched() {
    let s = visible_sprite("sb/a.png", Origin::Centre, DEFAULT_POSITION);
    let mut textures = FakeTextures::default();
    let mut renderer = Recorder::default();
    let mut stats = FrameStats::new();
    let outcome = draw_sprite(&s, 2000.0, &settings(), &mut textures, &mut renderer, &mut stats);
    assert_eq!(outcome, DrawOutcome::Skipped(SkipReason::Inactive));
    assert_eq!(stats, FrameStats::new());
}

#[test]
fn zero_scale_skips_draw() {
    let mut s = visible_sprite("sb/a.png", Origin::Centre, DEFAULT_POSITION);
    s.scale_vec(
        Ease::Linear,
        0.0,
        1000.0,
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 0.0),
    )
    .unwrap();
    let mut textures = FakeTextures::default().with("maps/sb/a.png", 10.0, 10.0);
    let mut renderer = Recorder::default();
    let mut stats = FrameStats::new();
    let outcome = draw_sprite(&s, 500.0, &settings(), &mut textures, &mut renderer, &mut stats);
    assert_eq!(outcome, DrawOutcome::Skipped(SkipReason::ZeroScale));
    assert_eq!(stats.sprite_count, 1);
}

#[test]
fn full_screen_sprite_covers_reference_area_once() {
    let s = visible_sprite("sb/bg.png", Origin::Centre, DEFAULT_POSITION);
    let mut textures = FakeTextures::default().with("maps/sb/bg.png", 854.0, 480.0);
    let mut renderer = Recorder::default();
    let mut stats = FrameStats::new();
    let outcome = draw_sprite(&s, 500.0, &settings(), &mut textures, &mut renderer, &mut stats);

    assert_eq!(outcome, DrawOutcome::Drawn);
    assert_eq!(stats.screen_fill, 1.0);
    assert_eq!(stats.effective_command_count, 1);

    let (x, y, origin, scale, rotation, color, blend) = renderer.quads[0];
    assert_eq!((x, y), (427.0, 240.0));
    assert_eq!(origin, Vec2::new(427.0, 240.0));
    assert_eq!(scale, Vec2::new(1.0, 1.0));
    assert_eq!(rotation, 0.0);
    assert_eq!(color, Rgba::WHITE);
    assert_eq!(blend, BlendMode::Alpha);
}

#[test]
fn oversized_sprite_contributes_at_most_one() {
    let mut s = visible_sprite("sb/bg.png", Origin::Centre, DEFAULT_POSITION);
    s.scale(Ease::Linear, 0.0, 1000.0, 4.0, 4.0).unwrap();
    let mut textures = FakeTextures::default().with("maps/sb/bg.png", 854.0, 480.0);
    let mut renderer = Recorder::default();
    let mut stats = FrameStats::new();
    draw_sprite(&s, 500.0, &settings(), &mut textures, &mut renderer, &mut stats);
    assert!(stats.screen_fill > 0.0 && stats.screen_fill <= 1.0);
}

#[test]
fn partially_visible_sprite_covers_its_visible_share() {
    let s = visible_sprite("sb/sq.png", Origin::TopLeft, Vec2::new(697.0, 0.0));
    let mut textures = FakeTextures::default().with("maps/sb/sq.png", 100.0, 100.0);
    let mut renderer = Recorder::default();
    let mut stats = FrameStats::new();
    draw_sprite(&s, 500.0, &settings(), &mut textures, &mut renderer, &mut stats);
    let expected = 5000.0 / WIDESCREEN_AREA;
    assert!((stats.screen_fill - expected).abs() < 1e-12);
}

#[test]
fn off_screen_sprite_is_drawn_without_effective_cost() {
    let s = visible_sprite("sb/sq.png", Origin::TopLeft, Vec2::new(2000.0, 0.0));
    let mut textures = FakeTextures::default().with("maps/sb/sq.png", 100.0, 100.0);
    let mut renderer = Recorder::default();
    let mut stats = FrameStats::new();
    let outcome = draw_sprite(&s, 500.0, &settings(), &mut textures, &mut renderer, &mut stats);
    assert_eq!(outcome, DrawOutcome::Drawn);
    assert_eq!(stats.effective_command_count, 0);
    assert_eq!(stats.screen_fill, 0.0);
}

#[test]
fn texture_falls_back_to_project_assets() {
    let s = visible_sprite("sb/a.png", Origin::Centre, DEFAULT_POSITION);
    let mut textures = FakeTextures::default().with("assets/sb/a.png", 10.0, 10.0);
    let mut renderer = Recorder::default();
    let mut stats = FrameStats::new();
    let outcome = draw_sprite(&s, 500.0, &settings(), &mut textures, &mut renderer, &mut stats);
    assert_eq!(outcome, DrawOutcome::Drawn);
    assert_eq!(
        textures.lookups,
        vec![PathBuf::from("maps/sb/a.png"), PathBuf::from("assets/sb/a.png")]
    );
}

#[test]
fn missing_or_busy_texture_skips_quietly() {
    let s = visible_sprite("sb/a.png", Origin::Centre, DEFAULT_POSITION);
    let mut renderer = Recorder::default();
    let mut stats = FrameStats::new();

    let mut textures = FakeTextures::default();
    let outcome = draw_sprite(&s, 500.0, &settings(), &mut textures, &mut renderer, &mut stats);
    assert_eq!(outcome, DrawOutcome::Skipped(SkipReason::MissingTexture));

    let mut textures = FakeTextures::default().with("maps/sb/a.png", 10.0, 10.0);
    textures.busy.insert(PathBuf::from("maps/sb/a.png"));
    let outcome = draw_sprite(&s, 500.0, &settings(), &mut textures, &mut renderer, &mut stats);
    assert_eq!(outcome, DrawOutcome::Skipped(SkipReason::TextureBusy));

    assert!(renderer.quads.is_empty());
    assert_eq!(stats.sprite_count, 2);
}

#[test]
fn flips_dim_and_additive_reach_the_quad() {
    let mut s = Sprite::new("sb/a.png", Origin::TopLeft, Vec2::new(320.0, 0.0));
    s.fade(Ease::Linear, 0.0, 1000.0, 0.5, 0.5).unwrap();
    s.flip_h(0.0, 1000.0).unwrap();
    s.flip_v(0.0, 1000.0).unwrap();
    s.additive(0.0, 1000.0).unwrap();

    let settings = DrawSettings {
        dim_factor: 0.5,
        bounds: Rect::new(0.0, 0.0, 1708.0, 960.0),
        ..settings()
    };
    let mut textures = FakeTextures::default().with("maps/sb/a.png", 10.0, 20.0);
    let mut renderer = Recorder::default();
    let mut stats = FrameStats::new();
    draw_sprite(&s, 500.0, &settings, &mut textures, &mut renderer, &mut stats);

    let (x, y, origin, scale, _, color, blend) = renderer.quads[0];
    assert_eq!((x, y), (854.0, 0.0));
    assert_eq!(origin, Vec2::ZERO);
    assert_eq!(scale, Vec2::new(-2.0, -2.0));
    assert_eq!(color, Rgba::new(0.5, 0.5, 0.5, 0.5));
    assert_eq!(blend, BlendMode::Additive);
}

#[test]
fn storyboard_pass_resets_and_accumulates() {
    let mut sb = Storyboard::new();
    let layer = sb.get_layer("Main");
    layer.set_osb_layer(OsbLayer::Background);
    for _ in 0..2 {
        let id = layer.create_sprite("sb/bg.png", Origin::Centre, DEFAULT_POSITION);
        layer
            .require_sprite_mut(id)
            .unwrap()
            .fade(Ease::Linear, 0.0, 1000.0, 1.0, 1.0)
            .unwrap();
    }

    let mut textures = FakeTextures::default().with("maps/sb/bg.png", 854.0, 480.0);
    let mut renderer = Recorder::default();
    let mut stats = FrameStats {
        sprite_count: 99,
        ..FrameStats::default()
    };
    let drawn = draw_storyboard(&sb, 500.0, &settings(), &mut textures, &mut renderer, &mut stats);

    assert_eq!(drawn, 2);
    assert_eq!(stats.sprite_count, 2);
    assert_eq!(stats.screen_fill, 2.0);
    assert!(!stats.overlapped_commands);
}
