use std::{cmp::Ordering, fmt};

use crate::{
    animation::{ease::Ease, value::CommandValue},
    foundation::error::{StoryboardError, StoryboardResult},
    storyboard::export::ExportSettings,
};

/// Property a command drives, with its text-export type tag.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum CommandKind {
    Fade,
    Move,
    MoveX,
    MoveY,
    Scale,
    VectorScale,
    Rotate,
    Color,
    Parameter,
}

impl CommandKind {
    pub fn identifier(self) -> &'static str {
        match self {
            Self::Fade => "F",
            Self::Move => "M",
            Self::MoveX => "MX",
            Self::MoveY => "MY",
            Self::Scale => "S",
            Self::VectorScale => "V",
            Self::Rotate => "R",
            Self::Color => "C",
            Self::Parameter => "P",
        }
    }
}

/// Capability interface shared by plain commands and their decorators.
pub trait TypedCommand<V: CommandValue>: fmt::Debug {
    fn start_time(&self) -> f64;

    fn end_time(&self) -> f64;

    fn start_value(&self) -> &V;

    fn end_value(&self) -> &V;

    fn duration(&self) -> f64 {
        self.end_time() - self.start_time()
    }

    /// Unit weight approximating the command's rendering expense.
    fn cost(&self) -> u32;

    /// Easing curve, for constructs that define one.
    fn easing(&self) -> StoryboardResult<Ease>;

    fn value_at(&self, time: f64) -> StoryboardResult<V>;

    /// Write the command as one line of the text export form.
    fn write_osb(
        &self,
        out: &mut dyn fmt::Write,
        settings: &ExportSettings,
        indentation: usize,
    ) -> StoryboardResult<()>;
}

/// Tie-break applied after `(start, end)` when ordering commands of one property.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TieBreak {
    /// Later-declared commands sort after earlier ones.
    #[default]
    Declaration,
    /// Cheaper commands sort first, then declaration order.
    CostThenDeclaration,
}

/// Total order over commands: effective start, then end, then the tie-break policy.
///
/// `seq_a`/`seq_b` are declaration sequence numbers assigned by the owning timeline.
pub fn compare_commands<V: CommandValue>(
    a: &dyn TypedCommand<V>,
    seq_a: u64,
    b: &dyn TypedCommand<V>,
    seq_b: u64,
    tie_break: TieBreak,
) -> Ordering {
    a.start_time()
        .total_cmp(&b.start_time())
        .then_with(|| a.end_time().total_cmp(&b.end_time()))
        .then_with(|| match tie_break {
            TieBreak::Declaration => Ordering::Equal,
            TieBreak::CostThenDeclaration => a.cost().cmp(&b.cost()),
        })
        .then_with(|| seq_a.cmp(&seq_b))
}

/// Time-ranged, eased transition of one property. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Command<V> {
    kind: CommandKind,
    easing: Ease,
    start_time: f64,
    end_time: f64,
    start_value: V,
    end_value: V,
    cost: u32,
}

impl<V: CommandValue> Command<V> {
    pub fn new(
        kind: CommandKind,
        easing: Ease,
        start_time: f64,
        end_time: f64,
        start_value: V,
        end_value: V,
    ) -> StoryboardResult<Self> {
        if !start_time.is_finite() || !end_time.is_finite() {
            return Err(StoryboardError::validation(format!(
                "{} command times must be finite",
                kind.identifier()
            )));
        }
        if end_time < start_time {
            return Err(StoryboardError::validation(format!(
                "{} command ends ({end_time}) before it starts ({start_time})",
                kind.identifier()
            )));
        }
        Ok(Self {
            kind,
            easing,
            start_time,
            end_time,
            start_value,
            end_value,
            cost: 1,
        })
    }

    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost.max(1);
        self
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Same command moved `offset` milliseconds later.
    pub fn shifted(&self, offset: f64) -> Self {
        Self {
            start_time: self.start_time + offset,
            end_time: self.end_time + offset,
            ..self.clone()
        }
    }

    fn sample(&self, time: f64) -> V {
        if time >= self.end_time {
            return self.end_value.clone();
        }
        if time <= self.start_time {
            return self.start_value.clone();
        }
        let progress = ((time - self.start_time) / (self.end_time - self.start_time)).clamp(0.0, 1.0);
        V::interpolate(&self.start_value, &self.end_value, self.easing.apply(progress))
    }
}

impl<V: CommandValue> TypedCommand<V> for Command<V> {
    fn start_time(&self) -> f64 {
        self.start_time
    }

    fn end_time(&self) -> f64 {
        self.end_time
    }

    fn start_value(&self) -> &V {
        &self.start_value
    }

    fn end_value(&self) -> &V {
        &self.end_value
    }

    fn cost(&self) -> u32 {
        self.cost
    }

    fn easing(&self) -> StoryboardResult<Ease> {
        Ok(self.easing)
    }

    fn value_at(&self, time: f64) -> StoryboardResult<V> {
        Ok(self.sample(time))
    }

    fn write_osb(
        &self,
        out: &mut dyn fmt::Write,
        settings: &ExportSettings,
        indentation: usize,
    ) -> StoryboardResult<()> {
        let start = settings.format_time(self.start_time);
        let end = settings.format_time(self.end_time);
        let end = if start == end { String::new() } else { end };

        write!(
            out,
            "{}{},{},{},{},{}",
            settings.indent(indentation),
            self.kind.identifier(),
            self.easing.osb_id(),
            start,
            end,
            self.start_value.to_osb_string(settings)
        )?;
        if self.end_value != self.start_value {
            write!(out, ",{}", self.end_value.to_osb_string(settings))?;
        }
        writeln!(out)?;
        Ok(())
    }
}

impl<V: CommandValue> fmt::Display for Command<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}ms - {}ms): {:?} -> {:?}",
            self.kind.identifier(),
            self.start_time,
            self.end_time,
            self.start_value,
            self.end_value
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/command.rs"]
mod tests;
