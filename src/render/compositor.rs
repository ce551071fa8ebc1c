//! Per-frame sprite analysis: turns active sprites into quad draws and frame statistics.

use crate::{
    foundation::core::{OPACITY_EPSILON, Rgba, Vec2, WIDESCREEN_AREA, WIDESCREEN_BOUNDS},
    foundation::math::{OrientedBoundingBox, intersection_area},
    render::{
        settings::DrawSettings,
        stats::FrameStats,
        texture::{Texture, TextureProvider},
    },
    storyboard::{
        layer::{Storyboard, StoryboardLayer},
        sprite::Sprite,
    },
};

/// Blend state of a quad draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub enum BlendMode {
    #[default]
    Alpha,
    Additive,
}

/// One textured quad, in viewport pixels.
#[derive(Clone, Copy, Debug)]
pub struct Quad<'a, T> {
    pub texture: &'a T,
    pub x: f64,
    pub y: f64,
    /// Anchor offset inside the texture, in texture pixels.
    pub origin: Vec2,
    /// Signed: negative axes are flips. Includes the viewport scaling.
    pub scale: Vec2,
    /// Radians.
    pub rotation: f64,
    pub color: Rgba,
    pub blend: BlendMode,
}

/// Rasterizer seam: consumes quads in draw order.
pub trait QuadRenderer<T> {
    fn draw_quad(&mut self, quad: &Quad<'_, T>);
}

/// Why a sprite produced no quad this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    Inactive,
    Transparent,
    ZeroScale,
    MissingTexture,
    TextureBusy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    Drawn,
    Skipped(SkipReason),
}

/// Sample `sprite` at `time` and draw it, accumulating into `stats`.
pub fn draw_sprite<P, R>(
    sprite: &Sprite,
    time: f64,
    settings: &DrawSettings,
    textures: &mut P,
    renderer: &mut R,
    stats: &mut FrameStats,
) -> DrawOutcome
where
    P: TextureProvider,
    R: QuadRenderer<P::Texture>,
{
    if sprite.texture_path().is_empty() || !sprite.is_active(time) {
        return DrawOutcome::Skipped(SkipReason::Inactive);
    }

    let cost = sprite.command_cost();
    stats.sprite_count += 1;
    stats.command_count += cost;
    stats.incompatible_commands |= sprite.has_incompatible_commands();
    stats.overlapped_commands |= sprite.has_overlapped_commands();

    let fade = sprite.opacity_at(time);
    if fade < OPACITY_EPSILON {
        tracing::trace!(path = sprite.texture_path(), time, "transparent");
        return DrawOutcome::Skipped(SkipReason::Transparent);
    }

    let mut scale = sprite.scale_at(time);
    if scale.x == 0.0 || scale.y == 0.0 {
        tracing::trace!(path = sprite.texture_path(), time, "zero scale");
        return DrawOutcome::Skipped(SkipReason::ZeroScale);
    }
    if sprite.flip_h_at(time) {
        scale.x = -scale.x;
    }
    if sprite.flip_v_at(time) {
        scale.y = -scale.y;
    }

    let texture_path = sprite.texture_path_at(time);
    let texture = match resolve_texture(textures, settings, &texture_path) {
        Ok(Some(texture)) => texture,
        Ok(None) => {
            tracing::trace!(path = %texture_path, "texture not found");
            return DrawOutcome::Skipped(SkipReason::MissingTexture);
        }
        Err(e) => {
            tracing::trace!(path = %texture_path, error = %e, "texture busy, skipping frame");
            return DrawOutcome::Skipped(SkipReason::TextureBusy);
        }
    };

    let position = sprite.position_at(time);
    let rotation = sprite.rotation_at(time);
    let color = sprite.color_at(time);
    let final_color = Rgba::new(color.r as f32, color.g as f32, color.b as f32, 1.0)
        .lerp_color(Rgba::BLACK, settings.dim_factor)
        .with_opacity(settings.opacity * fade as f32);
    let blend = if sprite.additive_at(time) {
        BlendMode::Additive
    } else {
        BlendMode::Alpha
    };

    let texture_size = texture.size();
    let origin = sprite.origin().vector(texture_size.x, texture_size.y);

    let size = Vec2::new(texture_size.x * scale.x, texture_size.y * scale.y);
    let obb = OrientedBoundingBox::new(
        position,
        Vec2::new(origin.x * scale.x, origin.y * scale.y),
        size.x,
        size.y,
        rotation,
    );
    if obb.intersects(WIDESCREEN_BOUNDS) {
        stats.effective_command_count += cost;
        stats.screen_fill += coverage(&obb, size);
    }

    let s = settings.bounds_scaling();
    let bounds = settings.bounds;
    renderer.draw_quad(&Quad {
        texture: &texture,
        x: bounds.x0 + bounds.width() * 0.5 + (position.x - 320.0) * s,
        y: bounds.y0 + position.y * s,
        origin,
        scale: scale * s,
        rotation,
        color: final_color,
        blend,
    });
    DrawOutcome::Drawn
}

/// Fraction of the reference screen covered by the sprite, in `[0, 1]`.
fn coverage(obb: &OrientedBoundingBox, size: Vec2) -> f64 {
    let aabb = obb.aabb();
    let aabb_area = aabb.width() * aabb.height();
    if aabb_area <= 0.0 {
        return 0.0;
    }
    let factor = intersection_area(aabb, WIDESCREEN_BOUNDS) / aabb_area;
    let area = (size.x * size.y).abs() * factor;
    area.min(WIDESCREEN_AREA) / WIDESCREEN_AREA
}

fn resolve_texture<P: TextureProvider>(
    textures: &mut P,
    settings: &DrawSettings,
    path: &str,
) -> std::io::Result<Option<P::Texture>> {
    if let Some(texture) = textures.get(&settings.mapset_path.join(path))? {
        return Ok(Some(texture));
    }
    textures.get(&settings.project_asset_path.join(path))
}

/// Draw every sprite of a layer, in order. Returns the number of quads issued.
#[tracing::instrument(skip_all, fields(layer = layer.identifier(), time = time))]
pub fn draw_layer<P, R>(
    layer: &StoryboardLayer,
    time: f64,
    settings: &DrawSettings,
    textures: &mut P,
    renderer: &mut R,
    stats: &mut FrameStats,
) -> usize
where
    P: TextureProvider,
    R: QuadRenderer<P::Texture>,
{
    layer
        .sprites()
        .iter()
        .filter(|sprite| {
            draw_sprite(sprite, time, settings, textures, renderer, stats) == DrawOutcome::Drawn
        })
        .count()
}

/// One full render pass: resets `stats`, then draws the layers bottom first.
pub fn draw_storyboard<P, R>(
    storyboard: &Storyboard,
    time: f64,
    settings: &DrawSettings,
    textures: &mut P,
    renderer: &mut R,
    stats: &mut FrameStats,
) -> usize
where
    P: TextureProvider,
    R: QuadRenderer<P::Texture>,
{
    stats.reset();
    let drawn: usize = storyboard
        .layers()
        .iter()
        .map(|layer| draw_layer(layer, time, settings, textures, renderer, stats))
        .sum();
    tracing::debug!(
        time,
        drawn,
        sprites = stats.sprite_count,
        screen_fill = stats.screen_fill,
        "frame composited"
    );
    drawn
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
