use std::fmt;

use crate::{
    animation::{
        command::{Command, CommandKind, TieBreak, TypedCommand},
        ease::Ease,
        timeline::{AnyTimeline, CommandTimeline},
        trigger::TriggerDecorator,
        value::{CommandColor, CommandParameter, CommandValue},
    },
    foundation::core::{OPACITY_EPSILON, Origin, Vec2},
    foundation::error::{StoryboardError, StoryboardResult},
    storyboard::{export::ExportSettings, layer::OsbLayer},
};

/// Baseline position of a sprite with no move commands.
pub const DEFAULT_POSITION: Vec2 = Vec2::new(320.0, 240.0);

/// What an animation does after its last frame.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum LoopType {
    #[default]
    LoopForever,
    LoopOnce,
}

impl LoopType {
    pub fn osb_name(self) -> &'static str {
        match self {
            Self::LoopForever => "LoopForever",
            Self::LoopOnce => "LoopOnce",
        }
    }
}

/// Frame sequence parameters of an animation sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSpec {
    frame_count: u32,
    frame_delay: f64,
    loop_type: LoopType,
}

impl AnimationSpec {
    pub fn new(frame_count: u32, frame_delay: f64, loop_type: LoopType) -> StoryboardResult<Self> {
        if frame_count == 0 {
            return Err(StoryboardError::validation(
                "animation frame count must be > 0",
            ));
        }
        if !(frame_delay.is_finite() && frame_delay > 0.0) {
            return Err(StoryboardError::validation(
                "animation frame delay must be a positive number of milliseconds",
            ));
        }
        Ok(Self {
            frame_count,
            frame_delay,
            loop_type,
        })
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn frame_delay(&self) -> f64 {
        self.frame_delay
    }

    pub fn loop_type(&self) -> LoopType {
        self.loop_type
    }

    /// Frame shown `elapsed` milliseconds after the animation starts.
    pub fn frame_at(&self, elapsed: f64) -> u32 {
        let frame = (elapsed / self.frame_delay).floor().max(0.0) as u64;
        let count = u64::from(self.frame_count);
        let frame = match self.loop_type {
            LoopType::LoopForever => frame % count,
            LoopType::LoopOnce => frame.min(count - 1),
        };
        frame as u32
    }
}

/// A command bound to the property it drives.
#[derive(Clone, Debug, PartialEq)]
pub enum SpriteCommand {
    Fade(Command<f64>),
    Move(Command<Vec2>),
    MoveX(Command<f64>),
    MoveY(Command<f64>),
    Scale(Command<f64>),
    VectorScale(Command<Vec2>),
    Rotate(Command<f64>),
    Color(Command<CommandColor>),
    Parameter(Command<CommandParameter>),
}

impl SpriteCommand {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Fade(c) | Self::MoveX(c) | Self::MoveY(c) | Self::Scale(c) | Self::Rotate(c) => {
                c.kind()
            }
            Self::Move(c) | Self::VectorScale(c) => c.kind(),
            Self::Color(c) => c.kind(),
            Self::Parameter(c) => c.kind(),
        }
    }

    fn as_exportable(&self) -> &dyn ExportableCommand {
        match self {
            Self::Fade(c) | Self::MoveX(c) | Self::MoveY(c) | Self::Scale(c) | Self::Rotate(c) => c,
            Self::Move(c) | Self::VectorScale(c) => c,
            Self::Color(c) => c,
            Self::Parameter(c) => c,
        }
    }

    pub fn start_time(&self) -> f64 {
        self.as_exportable().start()
    }

    pub fn end_time(&self) -> f64 {
        self.as_exportable().end()
    }

    fn shifted(&self, offset: f64) -> Self {
        match self {
            Self::Fade(c) => Self::Fade(c.shifted(offset)),
            Self::Move(c) => Self::Move(c.shifted(offset)),
            Self::MoveX(c) => Self::MoveX(c.shifted(offset)),
            Self::MoveY(c) => Self::MoveY(c.shifted(offset)),
            Self::Scale(c) => Self::Scale(c.shifted(offset)),
            Self::VectorScale(c) => Self::VectorScale(c.shifted(offset)),
            Self::Rotate(c) => Self::Rotate(c.shifted(offset)),
            Self::Color(c) => Self::Color(c.shifted(offset)),
            Self::Parameter(c) => Self::Parameter(c.shifted(offset)),
        }
    }

    pub fn write_osb(
        &self,
        out: &mut dyn fmt::Write,
        settings: &ExportSettings,
        indentation: usize,
    ) -> StoryboardResult<()> {
        self.as_exportable().write(out, settings, indentation)
    }
}

trait ExportableCommand {
    fn start(&self) -> f64;
    fn end(&self) -> f64;
    fn write(
        &self,
        out: &mut dyn fmt::Write,
        settings: &ExportSettings,
        indentation: usize,
    ) -> StoryboardResult<()>;
}

impl<V: CommandValue> ExportableCommand for Command<V> {
    fn start(&self) -> f64 {
        self.start_time()
    }

    fn end(&self) -> f64 {
        self.end_time()
    }

    fn write(
        &self,
        out: &mut dyn fmt::Write,
        settings: &ExportSettings,
        indentation: usize,
    ) -> StoryboardResult<()> {
        self.write_osb(out, settings, indentation)
    }
}

/// Commands authored as one batch between a group start and [`Sprite::end_group`].
#[derive(Clone, Debug, PartialEq)]
pub enum CommandGroup {
    /// Commands in loop-local time, repeated `loop_count` times from `start_time`.
    Loop {
        start_time: f64,
        loop_count: u32,
        commands: Vec<SpriteCommand>,
    },
    /// Commands relative to the trigger instant, armed during `[start_time, end_time]`.
    Trigger {
        trigger_name: String,
        start_time: f64,
        end_time: f64,
        group_number: i32,
        commands: Vec<SpriteCommand>,
    },
}

impl CommandGroup {
    fn commands_mut(&mut self) -> &mut Vec<SpriteCommand> {
        match self {
            Self::Loop { commands, .. } | Self::Trigger { commands, .. } => commands,
        }
    }

    fn write_osb(
        &self,
        out: &mut dyn fmt::Write,
        settings: &ExportSettings,
        indentation: usize,
    ) -> StoryboardResult<()> {
        let commands = match self {
            Self::Loop {
                start_time,
                loop_count,
                commands,
            } => {
                writeln!(
                    out,
                    "{}L,{},{}",
                    settings.indent(indentation),
                    settings.format_time(*start_time),
                    loop_count
                )?;
                commands
            }
            Self::Trigger {
                trigger_name,
                start_time,
                end_time,
                group_number,
                commands,
            } => {
                write!(
                    out,
                    "{}T,{},{},{}",
                    settings.indent(indentation),
                    trigger_name,
                    settings.format_time(*start_time),
                    settings.format_time(*end_time)
                )?;
                if *group_number != 0 {
                    write!(out, ",{group_number}")?;
                }
                writeln!(out)?;
                commands
            }
        };
        for c in commands {
            c.write_osb(out, settings, indentation + 1)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
enum AuthoredEntry {
    Command(SpriteCommand),
    Group(CommandGroup),
}

#[derive(Clone, Debug, PartialEq)]
struct TriggerWindow {
    name: String,
    start_time: f64,
    end_time: f64,
}

/// A visual entity whose properties are driven by per-property command timelines.
#[derive(Debug)]
pub struct Sprite {
    texture_path: String,
    origin: Origin,
    initial_position: Vec2,
    animation: Option<AnimationSpec>,

    fade: CommandTimeline<f64>,
    move_: CommandTimeline<Vec2>,
    move_x: CommandTimeline<f64>,
    move_y: CommandTimeline<f64>,
    scale: CommandTimeline<f64>,
    vector_scale: CommandTimeline<Vec2>,
    rotate: CommandTimeline<f64>,
    color: CommandTimeline<CommandColor>,
    additive: CommandTimeline<CommandParameter>,
    flip_h: CommandTimeline<CommandParameter>,
    flip_v: CommandTimeline<CommandParameter>,

    authored: Vec<AuthoredEntry>,
    open_group: Option<CommandGroup>,
    trigger_windows: Vec<TriggerWindow>,
}

impl Sprite {
    pub fn new(texture_path: impl Into<String>, origin: Origin, initial_position: Vec2) -> Self {
        Self::with_options(
            texture_path,
            origin,
            initial_position,
            None,
            TieBreak::default(),
        )
    }

    pub fn animation(
        texture_path: impl Into<String>,
        spec: AnimationSpec,
        origin: Origin,
        initial_position: Vec2,
    ) -> Self {
        Self::with_options(
            texture_path,
            origin,
            initial_position,
            Some(spec),
            TieBreak::default(),
        )
    }

    pub fn with_options(
        texture_path: impl Into<String>,
        origin: Origin,
        initial_position: Vec2,
        animation: Option<AnimationSpec>,
        tie_break: TieBreak,
    ) -> Self {
        Self {
            texture_path: texture_path.into(),
            origin,
            initial_position,
            animation,
            fade: CommandTimeline::new(tie_break),
            move_: CommandTimeline::new(tie_break),
            move_x: CommandTimeline::new(tie_break),
            move_y: CommandTimeline::new(tie_break),
            scale: CommandTimeline::new(tie_break),
            vector_scale: CommandTimeline::new(tie_break),
            rotate: CommandTimeline::new(tie_break),
            color: CommandTimeline::new(tie_break),
            additive: CommandTimeline::new(tie_break),
            flip_h: CommandTimeline::new(tie_break),
            flip_v: CommandTimeline::new(tie_break),
            authored: Vec::new(),
            open_group: None,
            trigger_windows: Vec::new(),
        }
    }

    pub fn texture_path(&self) -> &str {
        &self.texture_path
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn initial_position(&self) -> Vec2 {
        self.initial_position
    }

    pub fn animation_spec(&self) -> Option<&AnimationSpec> {
        self.animation.as_ref()
    }

    fn timelines(&self) -> [&dyn AnyTimeline; 11] {
        [
            &self.fade,
            &self.move_,
            &self.move_x,
            &self.move_y,
            &self.scale,
            &self.vector_scale,
            &self.rotate,
            &self.color,
            &self.additive,
            &self.flip_h,
            &self.flip_v,
        ]
    }

    fn timelines_mut(&mut self) -> [&mut dyn AnyTimeline; 11] {
        [
            &mut self.fade,
            &mut self.move_,
            &mut self.move_x,
            &mut self.move_y,
            &mut self.scale,
            &mut self.vector_scale,
            &mut self.rotate,
            &mut self.color,
            &mut self.additive,
            &mut self.flip_h,
            &mut self.flip_v,
        ]
    }

    // Authoring

    /// Append a command, to the open group if there is one.
    pub fn add(&mut self, command: SpriteCommand) -> StoryboardResult<()> {
        if let SpriteCommand::Parameter(c) = &command
            && *c.start_value() == CommandParameter::None
        {
            return Err(StoryboardError::validation(
                "parameter commands need a parameter",
            ));
        }

        match &mut self.open_group {
            Some(group) => group.commands_mut().push(command),
            None => {
                self.authored.push(AuthoredEntry::Command(command.clone()));
                self.route(command, None);
            }
        }
        Ok(())
    }

    pub fn fade(
        &mut self,
        easing: Ease,
        start_time: f64,
        end_time: f64,
        from: f64,
        to: f64,
    ) -> StoryboardResult<()> {
        let c = Command::new(CommandKind::Fade, easing, start_time, end_time, from, to)?;
        self.add(SpriteCommand::Fade(c))
    }

    pub fn move_(
        &mut self,
        easing: Ease,
        start_time: f64,
        end_time: f64,
        from: Vec2,
        to: Vec2,
    ) -> StoryboardResult<()> {
        let c = Command::new(CommandKind::Move, easing, start_time, end_time, from, to)?;
        self.add(SpriteCommand::Move(c))
    }

    pub fn move_x(
        &mut self,
        easing: Ease,
        start_time: f64,
        end_time: f64,
        from: f64,
        to: f64,
    ) -> StoryboardResult<()> {
        let c = Command::new(CommandKind::MoveX, easing, start_time, end_time, from, to)?;
        self.add(SpriteCommand::MoveX(c))
    }

    pub fn move_y(
        &mut self,
        easing: Ease,
        start_time: f64,
        end_time: f64,
        from: f64,
        to: f64,
    ) -> StoryboardResult<()> {
        let c = Command::new(CommandKind::MoveY, easing, start_time, end_time, from, to)?;
        self.add(SpriteCommand::MoveY(c))
    }

    pub fn scale(
        &mut self,
        easing: Ease,
        start_time: f64,
        end_time: f64,
        from: f64,
        to: f64,
    ) -> StoryboardResult<()> {
        let c = Command::new(CommandKind::Scale, easing, start_time, end_time, from, to)?;
        self.add(SpriteCommand::Scale(c))
    }

    pub fn scale_vec(
        &mut self,
        easing: Ease,
        start_time: f64,
        end_time: f64,
        from: Vec2,
        to: Vec2,
    ) -> StoryboardResult<()> {
        let c = Command::new(
            CommandKind::VectorScale,
            easing,
            start_time,
            end_time,
            from,
            to,
        )?;
        self.add(SpriteCommand::VectorScale(c))
    }

    pub fn rotate(
        &mut self,
        easing: Ease,
        start_time: f64,
        end_time: f64,
        from: f64,
        to: f64,
    ) -> StoryboardResult<()> {
        let c = Command::new(CommandKind::Rotate, easing, start_time, end_time, from, to)?;
        self.add(SpriteCommand::Rotate(c))
    }

    pub fn color(
        &mut self,
        easing: Ease,
        start_time: f64,
        end_time: f64,
        from: CommandColor,
        to: CommandColor,
    ) -> StoryboardResult<()> {
        let c = Command::new(CommandKind::Color, easing, start_time, end_time, from, to)?;
        self.add(SpriteCommand::Color(c))
    }

    pub fn parameter(
        &mut self,
        start_time: f64,
        end_time: f64,
        parameter: CommandParameter,
    ) -> StoryboardResult<()> {
        let c = Command::new(
            CommandKind::Parameter,
            Ease::Linear,
            start_time,
            end_time,
            parameter,
            parameter,
        )?;
        self.add(SpriteCommand::Parameter(c))
    }

    pub fn flip_h(&mut self, start_time: f64, end_time: f64) -> StoryboardResult<()> {
        self.parameter(start_time, end_time, CommandParameter::FlipHorizontal)
    }

    pub fn flip_v(&mut self, start_time: f64, end_time: f64) -> StoryboardResult<()> {
        self.parameter(start_time, end_time, CommandParameter::FlipVertical)
    }

    pub fn additive(&mut self, start_time: f64, end_time: f64) -> StoryboardResult<()> {
        self.parameter(start_time, end_time, CommandParameter::AdditiveBlending)
    }

    // Groups

    pub fn in_group(&self) -> bool {
        self.open_group.is_some()
    }

    pub fn start_loop_group(&mut self, start_time: f64, loop_count: u32) -> StoryboardResult<()> {
        if loop_count == 0 {
            return Err(StoryboardError::validation("loop count must be > 0"));
        }
        self.open(CommandGroup::Loop {
            start_time,
            loop_count,
            commands: Vec::new(),
        })
    }

    pub fn start_trigger_group(
        &mut self,
        trigger_name: impl Into<String>,
        start_time: f64,
        end_time: f64,
        group_number: i32,
    ) -> StoryboardResult<()> {
        if end_time < start_time {
            return Err(StoryboardError::validation(
                "trigger group ends before it starts",
            ));
        }
        self.open(CommandGroup::Trigger {
            trigger_name: trigger_name.into(),
            start_time,
            end_time,
            group_number,
            commands: Vec::new(),
        })
    }

    fn open(&mut self, group: CommandGroup) -> StoryboardResult<()> {
        if self.open_group.is_some() {
            return Err(StoryboardError::invalid_operation(
                "a command group is already open; end it first",
            ));
        }
        self.open_group = Some(group);
        Ok(())
    }

    /// Close the open group, placing its commands on the timelines.
    pub fn end_group(&mut self) -> StoryboardResult<()> {
        let group = self
            .open_group
            .take()
            .ok_or_else(|| StoryboardError::invalid_operation("no command group is open"))?;

        match &group {
            CommandGroup::Loop {
                start_time,
                loop_count,
                commands,
            } => {
                let iteration = commands
                    .iter()
                    .map(SpriteCommand::end_time)
                    .fold(0.0, f64::max);
                for i in 0..*loop_count {
                    let offset = start_time + f64::from(i) * iteration;
                    for c in commands {
                        self.route(c.shifted(offset), None);
                    }
                }
            }
            CommandGroup::Trigger {
                trigger_name,
                start_time,
                end_time,
                commands,
                ..
            } => {
                let index = self.trigger_windows.len();
                self.trigger_windows.push(TriggerWindow {
                    name: trigger_name.clone(),
                    start_time: *start_time,
                    end_time: *end_time,
                });
                for c in commands {
                    self.route(c.clone(), Some(index));
                }
            }
        }
        self.authored.push(AuthoredEntry::Group(group));
        Ok(())
    }

    /// Render-readiness step: closes a group left open by authoring code.
    pub fn post_process(&mut self) -> StoryboardResult<()> {
        if self.in_group() {
            self.end_group()?;
        }
        Ok(())
    }

    fn route(&mut self, command: SpriteCommand, trigger: Option<usize>) {
        match command {
            SpriteCommand::Fade(c) => place(&mut self.fade, c, trigger),
            SpriteCommand::Move(c) => place(&mut self.move_, c, trigger),
            SpriteCommand::MoveX(c) => place(&mut self.move_x, c, trigger),
            SpriteCommand::MoveY(c) => place(&mut self.move_y, c, trigger),
            SpriteCommand::Scale(c) => place(&mut self.scale, c, trigger),
            SpriteCommand::VectorScale(c) => place(&mut self.vector_scale, c, trigger),
            SpriteCommand::Rotate(c) => place(&mut self.rotate, c, trigger),
            SpriteCommand::Color(c) => place(&mut self.color, c, trigger),
            SpriteCommand::Parameter(c) => {
                let timeline = match c.start_value() {
                    CommandParameter::FlipHorizontal => &mut self.flip_h,
                    CommandParameter::FlipVertical => &mut self.flip_v,
                    CommandParameter::AdditiveBlending | CommandParameter::None => {
                        &mut self.additive
                    }
                };
                place(timeline, c, trigger)
            }
        }
    }

    // Triggers

    /// Fire `trigger_name` at `time`: activates the decorators of every matching group whose
    /// window contains `time`. Returns how many decorators changed state.
    pub fn trigger(&mut self, trigger_name: &str, time: f64) -> usize {
        let groups: Vec<usize> = self
            .trigger_windows
            .iter()
            .enumerate()
            .filter(|(_, w)| w.name == trigger_name && w.start_time <= time && time <= w.end_time)
            .map(|(i, _)| i)
            .collect();

        let mut changed = 0;
        for group in groups {
            for timeline in self.timelines_mut() {
                changed += timeline.trigger_group(group, time);
            }
        }
        if changed > 0 {
            tracing::debug!(trigger = trigger_name, time, changed, "trigger activated");
        }
        changed
    }

    /// Deactivate every decorator of `trigger_name`. Returns how many changed state.
    pub fn untrigger(&mut self, trigger_name: &str) -> usize {
        let groups: Vec<usize> = self
            .trigger_windows
            .iter()
            .enumerate()
            .filter(|(_, w)| w.name == trigger_name)
            .map(|(i, _)| i)
            .collect();

        let mut changed = 0;
        for group in groups {
            for timeline in self.timelines_mut() {
                changed += timeline.untrigger_group(group);
            }
        }
        if changed > 0 {
            tracing::debug!(trigger = trigger_name, changed, "trigger released");
        }
        changed
    }

    // Aggregates

    pub fn start_time(&self) -> Option<f64> {
        self.timelines()
            .iter()
            .filter_map(|t| t.start_time())
            .reduce(f64::min)
    }

    pub fn end_time(&self) -> Option<f64> {
        self.timelines()
            .iter()
            .filter_map(|t| t.end_time())
            .reduce(f64::max)
    }

    /// `true` when `time` lies within the sprite's overall command window.
    pub fn is_active(&self, time: f64) -> bool {
        match (self.start_time(), self.end_time()) {
            (Some(start), Some(end)) => start <= time && time <= end,
            _ => false,
        }
    }

    /// Active, opaque enough to see, and not collapsed on either axis.
    pub fn is_visible(&self, time: f64) -> bool {
        if !self.is_active(time) || self.opacity_at(time) < OPACITY_EPSILON {
            return false;
        }
        let scale = self.scale_at(time);
        scale.x != 0.0 && scale.y != 0.0
    }

    pub fn command_cost(&self) -> u64 {
        self.timelines().iter().map(|t| t.cost()).sum()
    }

    /// Move mixed with MoveX/MoveY, or Scale mixed with VectorScale.
    pub fn has_incompatible_commands(&self) -> bool {
        (self.move_.has_commands() && (self.move_x.has_commands() || self.move_y.has_commands()))
            || (self.scale.has_commands() && self.vector_scale.has_commands())
    }

    pub fn has_overlapped_commands(&self) -> bool {
        self.timelines().iter().any(|t| t.has_overlap())
    }

    // State at time

    pub fn texture_path_at(&self, time: f64) -> String {
        let Some(spec) = &self.animation else {
            return self.texture_path.clone();
        };
        let start = self.start_time().unwrap_or(0.0);
        frame_path(&self.texture_path, spec.frame_at(time - start))
    }

    pub fn position_at(&self, time: f64) -> Vec2 {
        if self.move_.has_commands() {
            return self.move_.value_or(time, self.initial_position);
        }
        Vec2::new(
            self.move_x.value_or(time, self.initial_position.x),
            self.move_y.value_or(time, self.initial_position.y),
        )
    }

    pub fn scale_at(&self, time: f64) -> Vec2 {
        if self.vector_scale.has_commands() {
            return self.vector_scale.value_or(time, Vec2::new(1.0, 1.0));
        }
        let s = self.scale.value_or(time, 1.0);
        Vec2::new(s, s)
    }

    /// Rotation in radians.
    pub fn rotation_at(&self, time: f64) -> f64 {
        self.rotate.value_or(time, 0.0)
    }

    pub fn opacity_at(&self, time: f64) -> f64 {
        self.fade.value_or(time, 1.0)
    }

    pub fn color_at(&self, time: f64) -> CommandColor {
        self.color.value_or(time, CommandColor::WHITE)
    }

    pub fn additive_at(&self, time: f64) -> bool {
        self.additive.parameter_at(time)
    }

    pub fn flip_h_at(&self, time: f64) -> bool {
        self.flip_h.parameter_at(time)
    }

    pub fn flip_v_at(&self, time: f64) -> bool {
        self.flip_v.parameter_at(time)
    }

    // Export

    /// Write the sprite header and its authored commands in the text export form.
    pub fn write_osb(
        &self,
        out: &mut dyn fmt::Write,
        settings: &ExportSettings,
        layer: OsbLayer,
    ) -> StoryboardResult<()> {
        if self.in_group() {
            return Err(StoryboardError::invalid_operation(
                "cannot export a sprite with an open command group",
            ));
        }

        let x = settings.format_value(self.initial_position.x);
        let y = settings.format_value(self.initial_position.y);
        match &self.animation {
            None => writeln!(
                out,
                "Sprite,{},{},\"{}\",{x},{y}",
                layer.osb_name(),
                self.origin.osb_name(),
                self.texture_path
            )?,
            Some(spec) => writeln!(
                out,
                "Animation,{},{},\"{}\",{x},{y},{},{},{}",
                layer.osb_name(),
                self.origin.osb_name(),
                self.texture_path,
                spec.frame_count,
                settings.format_value(spec.frame_delay),
                spec.loop_type.osb_name()
            )?,
        }

        for entry in &self.authored {
            match entry {
                AuthoredEntry::Command(c) => c.write_osb(out, settings, 1)?,
                AuthoredEntry::Group(g) => g.write_osb(out, settings, 1)?,
            }
        }
        Ok(())
    }
}

fn place<V: CommandValue>(
    timeline: &mut CommandTimeline<V>,
    command: Command<V>,
    trigger: Option<usize>,
) {
    match trigger {
        None => timeline.add(command),
        Some(group) => timeline.add_trigger(TriggerDecorator::new(Box::new(command)), group),
    }
}

/// `sb/anim.png` at frame 3 is `sb/anim3.png`.
fn frame_path(path: &str, frame: u32) -> String {
    let name_start = path.rfind(['/', '\\']).map_or(0, |i| i + 1);
    match path[name_start..].rfind('.') {
        Some(dot) => {
            let dot = name_start + dot;
            format!("{}{}{}", &path[..dot], frame, &path[dot..])
        }
        None => format!("{path}{frame}"),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storyboard/sprite.rs"]
mod tests;
