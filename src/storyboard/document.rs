use std::path::Path;

use anyhow::Context;

use crate::{
    animation::{
        command::{Command, CommandKind, TieBreak},
        ease::Ease,
        value::{CommandColor, CommandParameter},
    },
    foundation::core::{Origin, Vec2},
    foundation::error::{StoryboardError, StoryboardResult},
    storyboard::{
        layer::{OsbLayer, Storyboard, StoryboardLayer},
        sprite::{AnimationSpec, DEFAULT_POSITION, LoopType, Sprite, SpriteCommand},
    },
};

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Serializable description of a whole storyboard.
///
/// Documents are plain data; [`StoryboardDocument::build`] validates them and produces the
/// evaluable [`Storyboard`].
pub struct StoryboardDocument {
    /// Layers, bottom first.
    pub layers: Vec<LayerDoc>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One named layer.
pub struct LayerDoc {
    /// Unique layer identifier.
    pub name: String,
    /// Export layer the sprites are written to.
    #[serde(default)]
    pub osb_layer: OsbLayer,
    /// Ordering policy for same-window commands.
    #[serde(default)]
    pub tie_break: TieBreak,
    /// Sprites in draw order.
    #[serde(default)]
    pub sprites: Vec<SpriteDoc>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A sprite or, with `animation` set, an animation.
pub struct SpriteDoc {
    /// Texture path relative to the mapset or project asset directory.
    pub path: String,
    #[serde(default)]
    pub origin: Origin,
    /// Initial position in storyboard units.
    #[serde(default = "default_position")]
    pub position: [f64; 2],
    #[serde(default)]
    pub animation: Option<AnimationDoc>,
    /// Top-level commands, in authoring order.
    #[serde(default)]
    pub commands: Vec<CommandDoc>,
    /// Loop and trigger groups, authored after the top-level commands.
    #[serde(default)]
    pub groups: Vec<GroupDoc>,
}

fn default_position() -> [f64; 2] {
    [DEFAULT_POSITION.x, DEFAULT_POSITION.y]
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
/// Frame sequence of an animation sprite.
pub struct AnimationDoc {
    pub frame_count: u32,
    /// Milliseconds per frame.
    pub frame_delay: f64,
    #[serde(default)]
    pub loop_type: LoopType,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One command. `from`/`to` carry one component for scalar kinds, two for `Move` and
/// `VectorScale`, three (0..1 range) for `Color`. `Parameter` uses `param` instead.
pub struct CommandDoc {
    pub kind: CommandKind,
    #[serde(default)]
    pub easing: Ease,
    pub start: f64,
    /// Defaults to `start`.
    #[serde(default)]
    pub end: Option<f64>,
    #[serde(default)]
    pub from: Vec<f64>,
    /// Defaults to `from`.
    #[serde(default)]
    pub to: Option<Vec<f64>>,
    #[serde(default)]
    pub param: Option<CommandParameter>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// A command group.
pub enum GroupDoc {
    /// Commands in loop-local time repeated `count` times from `start`.
    Loop {
        start: f64,
        count: u32,
        commands: Vec<CommandDoc>,
    },
    /// Commands relative to the trigger instant, armed during `[start, end]`.
    Trigger {
        name: String,
        start: f64,
        end: f64,
        #[serde(default)]
        group: i32,
        commands: Vec<CommandDoc>,
    },
}

impl StoryboardDocument {
    #[tracing::instrument]
    pub fn from_json_file(path: &Path) -> StoryboardResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read storyboard document '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> StoryboardResult<Self> {
        serde_json::from_str(text).map_err(|e| StoryboardError::serde(e.to_string()))
    }

    pub fn to_json_string(&self) -> StoryboardResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StoryboardError::serde(e.to_string()))
    }

    /// Validate the document and build the storyboard, with every group closed.
    #[tracing::instrument(skip(self), fields(layers = self.layers.len()))]
    pub fn build(&self) -> StoryboardResult<Storyboard> {
        let mut storyboard = Storyboard::new();
        for layer_doc in &self.layers {
            let mut layer = StoryboardLayer::new(&layer_doc.name, layer_doc.osb_layer)
                .with_tie_break(layer_doc.tie_break);
            for (i, sprite_doc) in layer_doc.sprites.iter().enumerate() {
                build_sprite(&mut layer, sprite_doc).map_err(|e| {
                    StoryboardError::validation(format!(
                        "layer '{}' sprite #{i} ('{}'): {e}",
                        layer_doc.name, sprite_doc.path
                    ))
                })?;
            }
            storyboard.push_layer(layer)?;
        }
        storyboard.post_process()?;
        tracing::debug!(sprites = storyboard.sprite_count(), "storyboard built");
        Ok(storyboard)
    }
}

fn build_sprite(layer: &mut StoryboardLayer, doc: &SpriteDoc) -> StoryboardResult<()> {
    let position = Vec2::new(doc.position[0], doc.position[1]);
    let id = match &doc.animation {
        Some(a) => {
            let spec = AnimationSpec::new(a.frame_count, a.frame_delay, a.loop_type)?;
            layer.create_animation(&doc.path, spec, doc.origin, position)
        }
        None => layer.create_sprite(&doc.path, doc.origin, position),
    };
    let sprite = layer.require_sprite_mut(id)?;

    for c in &doc.commands {
        sprite.add(c.to_command()?)?;
    }
    for g in &doc.groups {
        add_group(sprite, g)?;
    }
    Ok(())
}

fn add_group(sprite: &mut Sprite, doc: &GroupDoc) -> StoryboardResult<()> {
    let commands = match doc {
        GroupDoc::Loop {
            start,
            count,
            commands,
        } => {
            sprite.start_loop_group(*start, *count)?;
            commands
        }
        GroupDoc::Trigger {
            name,
            start,
            end,
            group,
            commands,
        } => {
            sprite.start_trigger_group(name.clone(), *start, *end, *group)?;
            commands
        }
    };
    for c in commands {
        sprite.add(c.to_command()?)?;
    }
    sprite.end_group()
}

impl CommandDoc {
    pub fn to_command(&self) -> StoryboardResult<SpriteCommand> {
        let start = self.start;
        let end = self.end.unwrap_or(start);
        let from = &self.from;
        let to = self.to.as_deref().unwrap_or(from);

        Ok(match self.kind {
            CommandKind::Fade => SpriteCommand::Fade(self.scalar(start, end, from, to)?),
            CommandKind::MoveX => SpriteCommand::MoveX(self.scalar(start, end, from, to)?),
            CommandKind::MoveY => SpriteCommand::MoveY(self.scalar(start, end, from, to)?),
            CommandKind::Scale => SpriteCommand::Scale(self.scalar(start, end, from, to)?),
            CommandKind::Rotate => SpriteCommand::Rotate(self.scalar(start, end, from, to)?),
            CommandKind::Move => SpriteCommand::Move(self.vector(start, end, from, to)?),
            CommandKind::VectorScale => {
                SpriteCommand::VectorScale(self.vector(start, end, from, to)?)
            }
            CommandKind::Color => {
                let [fr, fg, fb] = self.components::<3>(from)?;
                let [tr, tg, tb] = self.components::<3>(to)?;
                SpriteCommand::Color(Command::new(
                    self.kind,
                    self.easing,
                    start,
                    end,
                    CommandColor::new(fr, fg, fb),
                    CommandColor::new(tr, tg, tb),
                )?)
            }
            CommandKind::Parameter => {
                let param = self.param.unwrap_or_default();
                SpriteCommand::Parameter(Command::new(
                    self.kind,
                    Ease::Linear,
                    start,
                    end,
                    param,
                    param,
                )?)
            }
        })
    }

    fn scalar(&self, start: f64, end: f64, from: &[f64], to: &[f64]) -> StoryboardResult<Command<f64>> {
        let [f] = self.components::<1>(from)?;
        let [t] = self.components::<1>(to)?;
        Command::new(self.kind, self.easing, start, end, f, t)
    }

    fn vector(
        &self,
        start: f64,
        end: f64,
        from: &[f64],
        to: &[f64],
    ) -> StoryboardResult<Command<Vec2>> {
        let [fx, fy] = self.components::<2>(from)?;
        let [tx, ty] = self.components::<2>(to)?;
        Command::new(
            self.kind,
            self.easing,
            start,
            end,
            Vec2::new(fx, fy),
            Vec2::new(tx, ty),
        )
    }

    fn components<const N: usize>(&self, values: &[f64]) -> StoryboardResult<[f64; N]> {
        let out: [f64; N] = values.try_into().map_err(|_| {
            StoryboardError::validation(format!(
                "{} command expects {N} component(s), got {}",
                self.kind.identifier(),
                values.len()
            ))
        })?;
        if out.iter().any(|v| !v.is_finite()) {
            return Err(StoryboardError::validation(format!(
                "{} command values must be finite",
                self.kind.identifier()
            )));
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storyboard/document.rs"]
mod tests;
