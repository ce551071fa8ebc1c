use std::fmt;

use crate::{
    animation::command::TieBreak,
    foundation::core::{Origin, Vec2},
    foundation::error::{StoryboardError, StoryboardResult},
    storyboard::{
        export::ExportSettings,
        sprite::{AnimationSpec, Sprite},
    },
};

/// Fixed export layer a storyboard layer writes its sprites to.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum OsbLayer {
    Background,
    Fail,
    Pass,
    #[default]
    Foreground,
    Overlay,
}

impl OsbLayer {
    pub const ALL: [Self; 5] = [
        Self::Background,
        Self::Fail,
        Self::Pass,
        Self::Foreground,
        Self::Overlay,
    ];

    pub fn osb_name(self) -> &'static str {
        match self {
            Self::Background => "Background",
            Self::Fail => "Fail",
            Self::Pass => "Pass",
            Self::Foreground => "Foreground",
            Self::Overlay => "Overlay",
        }
    }

    /// Section index used in the export comments.
    pub fn index(self) -> usize {
        match self {
            Self::Background => 0,
            Self::Fail => 1,
            Self::Pass => 2,
            Self::Foreground => 3,
            Self::Overlay => 4,
        }
    }
}

/// Stable handle of a sprite within its layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(pub usize);

/// Named, ordered collection of sprites. Later sprites draw on top.
#[derive(Debug)]
pub struct StoryboardLayer {
    identifier: String,
    osb_layer: OsbLayer,
    tie_break: TieBreak,
    sprites: Vec<Sprite>,
}

impl StoryboardLayer {
    pub fn new(identifier: impl Into<String>, osb_layer: OsbLayer) -> Self {
        Self {
            identifier: identifier.into(),
            osb_layer,
            tie_break: TieBreak::default(),
            sprites: Vec::new(),
        }
    }

    /// Ordering policy applied to the timelines of sprites created from now on.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn osb_layer(&self) -> OsbLayer {
        self.osb_layer
    }

    pub fn set_osb_layer(&mut self, osb_layer: OsbLayer) {
        self.osb_layer = osb_layer;
    }

    pub fn create_sprite(
        &mut self,
        path: impl Into<String>,
        origin: Origin,
        initial_position: Vec2,
    ) -> SpriteId {
        self.push(Sprite::with_options(
            path,
            origin,
            initial_position,
            None,
            self.tie_break,
        ))
    }

    pub fn create_animation(
        &mut self,
        path: impl Into<String>,
        spec: AnimationSpec,
        origin: Origin,
        initial_position: Vec2,
    ) -> SpriteId {
        self.push(Sprite::with_options(
            path,
            origin,
            initial_position,
            Some(spec),
            self.tie_break,
        ))
    }

    fn push(&mut self, sprite: Sprite) -> SpriteId {
        self.sprites.push(sprite);
        SpriteId(self.sprites.len() - 1)
    }

    pub fn sprite(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.get(id.0)
    }

    pub fn sprite_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.sprites.get_mut(id.0)
    }

    /// Like [`Self::sprite_mut`], as an error for ids from another layer.
    pub fn require_sprite_mut(&mut self, id: SpriteId) -> StoryboardResult<&mut Sprite> {
        let identifier = &self.identifier;
        self.sprites.get_mut(id.0).ok_or_else(|| {
            StoryboardError::invalid_operation(format!(
                "layer '{identifier}' has no sprite #{}",
                id.0
            ))
        })
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn post_process(&mut self) -> StoryboardResult<()> {
        for sprite in &mut self.sprites {
            sprite.post_process()?;
        }
        Ok(())
    }

    /// Fire a named trigger on every sprite of the layer.
    pub fn trigger(&mut self, trigger_name: &str, time: f64) -> usize {
        self.sprites
            .iter_mut()
            .map(|s| s.trigger(trigger_name, time))
            .sum()
    }

    pub fn untrigger(&mut self, trigger_name: &str) -> usize {
        self.sprites
            .iter_mut()
            .map(|s| s.untrigger(trigger_name))
            .sum()
    }

    pub fn write_osb(
        &self,
        out: &mut dyn fmt::Write,
        settings: &ExportSettings,
    ) -> StoryboardResult<()> {
        for sprite in &self.sprites {
            sprite.write_osb(out, settings, self.osb_layer)?;
        }
        Ok(())
    }
}

/// Ordered set of layers, bottom first.
#[derive(Debug, Default)]
pub struct Storyboard {
    layers: Vec<StoryboardLayer>,
}

impl Storyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer named `identifier`, created on the Foreground export layer if missing.
    pub fn get_layer(&mut self, identifier: &str) -> &mut StoryboardLayer {
        let index = match self.layers.iter().position(|l| l.identifier == identifier) {
            Some(index) => index,
            None => {
                tracing::debug!(layer = identifier, "creating storyboard layer");
                self.layers
                    .push(StoryboardLayer::new(identifier, OsbLayer::default()));
                self.layers.len() - 1
            }
        };
        &mut self.layers[index]
    }

    pub fn push_layer(&mut self, layer: StoryboardLayer) -> StoryboardResult<()> {
        if self.layer(layer.identifier()).is_some() {
            return Err(StoryboardError::validation(format!(
                "duplicate layer '{}'",
                layer.identifier()
            )));
        }
        self.layers.push(layer);
        Ok(())
    }

    pub fn layer(&self, identifier: &str) -> Option<&StoryboardLayer> {
        self.layers.iter().find(|l| l.identifier == identifier)
    }

    pub fn layers(&self) -> &[StoryboardLayer] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [StoryboardLayer] {
        &mut self.layers
    }

    pub fn sprite_count(&self) -> usize {
        self.layers.iter().map(StoryboardLayer::len).sum()
    }

    pub fn post_process(&mut self) -> StoryboardResult<()> {
        for layer in &mut self.layers {
            layer.post_process()?;
        }
        Ok(())
    }

    pub fn trigger(&mut self, trigger_name: &str, time: f64) -> usize {
        self.layers
            .iter_mut()
            .map(|l| l.trigger(trigger_name, time))
            .sum()
    }

    pub fn untrigger(&mut self, trigger_name: &str) -> usize {
        self.layers.iter_mut().map(|l| l.untrigger(trigger_name)).sum()
    }

    /// Write every layer grouped by export layer, in the text export form.
    #[tracing::instrument(skip(self, out, settings))]
    pub fn write_osb(
        &self,
        out: &mut dyn fmt::Write,
        settings: &ExportSettings,
    ) -> StoryboardResult<()> {
        writeln!(out, "[Events]")?;
        writeln!(out, "//Background and Video events")?;
        for osb_layer in OsbLayer::ALL {
            writeln!(
                out,
                "//Storyboard Layer {} ({})",
                osb_layer.index(),
                osb_layer.osb_name()
            )?;
            for layer in self.layers.iter().filter(|l| l.osb_layer == osb_layer) {
                layer.write_osb(out, settings)?;
            }
        }
        writeln!(out, "//Storyboard Sound Samples")?;
        Ok(())
    }

    pub fn to_osb_string(&self, settings: &ExportSettings) -> StoryboardResult<String> {
        let mut out = String::new();
        self.write_osb(&mut out, settings)?;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storyboard/layer.rs"]
mod tests;
