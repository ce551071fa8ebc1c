//! Storyboard timeline evaluation and sprite compositing.
//!
//! A storyboard is a set of layers of sprites. Each sprite property (position, scale, rotation,
//! color, opacity, blend and flip parameters) is driven by a timeline of time-ranged, eased
//! commands; trigger groups add commands that only take effect once an external event fires.
//!
//! # Pipeline overview
//!
//! 1. **Author**: build sprites directly, through [`SpritePool`]s, from a
//!    [`StoryboardDocument`], or inside a [`GeneratorContext`].
//! 2. **Evaluate**: sample a [`Sprite`] at a time in milliseconds ([`Sprite::position_at`],
//!    [`Sprite::opacity_at`], ...).
//! 3. **Composite**: [`draw_storyboard`] walks every active sprite, issues one [`Quad`] per
//!    visible sprite to a [`QuadRenderer`] and fills [`FrameStats`].
//! 4. **Export** (optional): write the line-oriented text form with [`Storyboard::write_osb`].
//!
//! Evaluation is single-threaded and synchronous; authoring and rendering of one storyboard
//! must not overlap.
#![forbid(unsafe_code)]

mod animation;
mod foundation;
mod generator;
mod render;
mod storyboard;

pub use animation::command::{Command, CommandKind, TieBreak, TypedCommand, compare_commands};
pub use animation::ease::Ease;
pub use animation::timeline::{CommandTimeline, TimelineEntry};
pub use animation::trigger::TriggerDecorator;
pub use animation::value::{CommandColor, CommandParameter, CommandValue};
pub use foundation::core::{
    OPACITY_EPSILON, Origin, Point, Rect, Rgba, STORYBOARD_HEIGHT, STORYBOARD_WIDTH, Vec2,
    WIDESCREEN_AREA, WIDESCREEN_BOUNDS,
};
pub use foundation::error::{StoryboardError, StoryboardResult};
pub use generator::audio::{AudioAnalyzer, AudioStream};
pub use generator::context::{GeneratorContext, ProjectPaths};
pub use render::compositor::{
    BlendMode, DrawOutcome, Quad, QuadRenderer, SkipReason, draw_layer, draw_sprite,
    draw_storyboard,
};
pub use render::settings::DrawSettings;
pub use render::stats::FrameStats;
pub use render::texture::{FsTextureStore, Texture, TextureInfo, TextureProvider};
pub use storyboard::document::{
    AnimationDoc, CommandDoc, GroupDoc, LayerDoc, SpriteDoc, StoryboardDocument,
};
pub use storyboard::export::ExportSettings;
pub use storyboard::layer::{OsbLayer, SpriteId, Storyboard, StoryboardLayer};
pub use storyboard::pool::{
    AnimationFactory, FinalizeSprite, PoolStats, SpriteFactory, SpritePool, SpritePools,
    StaticSprite,
};
pub use storyboard::sprite::{
    AnimationSpec, CommandGroup, DEFAULT_POSITION, LoopType, Sprite, SpriteCommand,
};
