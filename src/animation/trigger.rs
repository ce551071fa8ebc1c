use std::fmt;

use crate::{
    animation::{command::TypedCommand, ease::Ease, value::CommandValue},
    foundation::error::{StoryboardError, StoryboardResult},
    storyboard::export::ExportSettings,
};

/// Gates a wrapped command behind an external activation.
///
/// While active, the wrapped command's time window is relative to the trigger instant.
#[derive(Debug)]
pub struct TriggerDecorator<V: CommandValue> {
    command: Box<dyn TypedCommand<V>>,
    trigger_time: f64,
    active: bool,
}

impl<V: CommandValue> TriggerDecorator<V> {
    pub fn new(command: Box<dyn TypedCommand<V>>) -> Self {
        Self {
            command,
            trigger_time: 0.0,
            active: false,
        }
    }

    pub fn active(&self) -> bool {
        self.active
    }

    /// Activate at `time`. Returns `true` when the state changed, `false` when already active.
    pub fn trigger(&mut self, time: f64) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.trigger_time = time;
        true
    }

    /// Deactivate. Returns `true` when the state changed, `false` when already inactive.
    pub fn untrigger(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        true
    }

    pub fn inner(&self) -> &dyn TypedCommand<V> {
        self.command.as_ref()
    }
}

impl<V: CommandValue> TypedCommand<V> for TriggerDecorator<V> {
    fn start_time(&self) -> f64 {
        self.trigger_time + self.command.start_time()
    }

    fn end_time(&self) -> f64 {
        self.trigger_time + self.command.end_time()
    }

    fn start_value(&self) -> &V {
        self.command.start_value()
    }

    fn end_value(&self) -> &V {
        self.command.end_value()
    }

    fn cost(&self) -> u32 {
        self.command.cost()
    }

    fn easing(&self) -> StoryboardResult<Ease> {
        Err(StoryboardError::invalid_operation(
            "a trigger decorator has no easing of its own",
        ))
    }

    fn value_at(&self, time: f64) -> StoryboardResult<V> {
        if !self.active {
            return Err(StoryboardError::invalid_operation("not triggered"));
        }

        let local = time - self.trigger_time;
        if local < self.command.start_time() {
            return Ok(self.command.start_value().clone());
        }
        if self.command.end_time() < local {
            return Ok(self.command.end_value().clone());
        }
        self.command.value_at(local)
    }

    fn write_osb(
        &self,
        _out: &mut dyn fmt::Write,
        _settings: &ExportSettings,
        _indentation: usize,
    ) -> StoryboardResult<()> {
        Err(StoryboardError::invalid_operation(
            "trigger decorators cannot be exported; export the trigger group instead",
        ))
    }
}

impl<V: CommandValue> fmt::Display for TriggerDecorator<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "triggerable ({}ms - {}ms active:{})",
            self.start_time(),
            self.end_time(),
            self.active
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/trigger.rs"]
mod tests;
