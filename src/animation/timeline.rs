use std::cmp::Ordering;

use crate::{
    animation::{
        command::{Command, TieBreak, TypedCommand, compare_commands},
        trigger::TriggerDecorator,
        value::{CommandParameter, CommandValue},
    },
    foundation::error::{StoryboardError, StoryboardResult},
};

/// A timeline element: a plain command, or a decorator activated through its trigger group.
#[derive(Debug)]
pub enum TimelineEntry<V: CommandValue> {
    Command(Command<V>),
    Trigger {
        decorator: TriggerDecorator<V>,
        /// Index of the owning sprite's trigger group.
        group: usize,
    },
}

impl<V: CommandValue> TimelineEntry<V> {
    pub fn as_command(&self) -> &dyn TypedCommand<V> {
        match self {
            Self::Command(c) => c,
            Self::Trigger { decorator, .. } => decorator,
        }
    }

    /// Whether the entry currently takes part in evaluation.
    pub fn is_live(&self) -> bool {
        match self {
            Self::Command(_) => true,
            Self::Trigger { decorator, .. } => decorator.active(),
        }
    }
}

#[derive(Debug)]
struct Slot<V: CommandValue> {
    seq: u64,
    entry: TimelineEntry<V>,
}

/// Ordered commands driving one property of one sprite.
///
/// The live window, the total cost and the per-slot reach index are cached and refreshed
/// whenever an entry is added or a trigger group changes state; queries never rescan.
#[derive(Debug)]
pub struct CommandTimeline<V: CommandValue> {
    slots: Vec<Slot<V>>,
    tie_break: TieBreak,
    next_seq: u64,
    has_overlap: bool,
    cost: u64,
    window: Option<(f64, f64)>,
    first_live: Option<usize>,
    /// `reach[i]`: latest end time among live slots `0..=i`, with the index of the slot
    /// reaching it (the later slot on ties).
    reach: Vec<Option<(f64, usize)>>,
}

impl<V: CommandValue> Default for CommandTimeline<V> {
    fn default() -> Self {
        Self::new(TieBreak::default())
    }
}

impl<V: CommandValue> CommandTimeline<V> {
    pub fn new(tie_break: TieBreak) -> Self {
        Self {
            slots: Vec::new(),
            tie_break,
            next_seq: 0,
            has_overlap: false,
            cost: 0,
            window: None,
            first_live: None,
            reach: Vec::new(),
        }
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    pub fn add(&mut self, command: Command<V>) {
        if self.live().any(|c| overlaps(c, &command)) {
            self.has_overlap = true;
        }
        self.push(TimelineEntry::Command(command));
    }

    pub fn add_trigger(&mut self, decorator: TriggerDecorator<V>, group: usize) {
        self.push(TimelineEntry::Trigger { decorator, group });
    }

    fn push(&mut self, entry: TimelineEntry<V>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let tie_break = self.tie_break;
        let index = self.slots.partition_point(|s| {
            compare_commands(s.entry.as_command(), s.seq, entry.as_command(), seq, tie_break)
                != Ordering::Greater
        });
        self.cost += u64::from(entry.as_command().cost());
        self.slots.insert(index, Slot { seq, entry });
        self.refresh();
    }

    fn sort(&mut self) {
        let tie_break = self.tie_break;
        self.slots.sort_by(|a, b| {
            compare_commands(a.entry.as_command(), a.seq, b.entry.as_command(), b.seq, tie_break)
        });
    }

    /// Rebuild the cached window and reach index from the sorted slots.
    fn refresh(&mut self) {
        self.window = None;
        self.first_live = None;
        self.reach.clear();

        let mut reach: Option<(f64, usize)> = None;
        for (i, slot) in self.slots.iter().enumerate() {
            if slot.entry.is_live() {
                let c = slot.entry.as_command();
                if self.first_live.is_none() {
                    self.first_live = Some(i);
                }
                self.window = Some(match self.window {
                    Some((start, end)) => (start.min(c.start_time()), end.max(c.end_time())),
                    None => (c.start_time(), c.end_time()),
                });
                reach = match reach {
                    Some((end, _)) if end > c.end_time() => reach,
                    _ => Some((c.end_time(), i)),
                };
            }
            self.reach.push(reach);
        }
    }

    /// Activate every decorator of `group` at `time`. Returns how many changed state.
    pub fn trigger_group(&mut self, group: usize, time: f64) -> usize {
        let mut changed = 0;
        for slot in &mut self.slots {
            if let TimelineEntry::Trigger { decorator, group: g } = &mut slot.entry
                && *g == group
                && decorator.trigger(time)
            {
                changed += 1;
            }
        }
        if changed > 0 {
            self.on_state_changed();
        }
        changed
    }

    /// Deactivate every decorator of `group`. Returns how many changed state.
    pub fn untrigger_group(&mut self, group: usize) -> usize {
        let mut changed = 0;
        for slot in &mut self.slots {
            if let TimelineEntry::Trigger { decorator, group: g } = &mut slot.entry
                && *g == group
                && decorator.untrigger()
            {
                changed += 1;
            }
        }
        if changed > 0 {
            self.on_state_changed();
        }
        changed
    }

    fn on_state_changed(&mut self) {
        self.sort();
        self.refresh();
        self.has_overlap |= self.sweep_overlap();
    }

    /// One pass over the live entries in order, testing each against the earlier entry
    /// reaching furthest.
    fn sweep_overlap(&self) -> bool {
        let mut furthest: Option<&dyn TypedCommand<V>> = None;
        for c in self.live() {
            if let Some(f) = furthest {
                if overlaps(f, c) {
                    return true;
                }
                if c.end_time() > f.end_time() {
                    furthest = Some(c);
                }
            } else {
                furthest = Some(c);
            }
        }
        false
    }

    /// Live entries (plain commands and active decorators) in timeline order.
    pub fn live(&self) -> impl Iterator<Item = &dyn TypedCommand<V>> {
        self.slots
            .iter()
            .filter(|s| s.entry.is_live())
            .map(|s| s.entry.as_command())
    }

    pub fn entries(&self) -> impl Iterator<Item = &TimelineEntry<V>> {
        self.slots.iter().map(|s| &s.entry)
    }

    /// Total number of owned entries, live or not.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether any entry currently drives the property.
    pub fn has_commands(&self) -> bool {
        self.first_live.is_some()
    }

    pub fn has_overlap(&self) -> bool {
        self.has_overlap
    }

    pub fn start_time(&self) -> Option<f64> {
        self.window.map(|(start, _)| start)
    }

    pub fn end_time(&self) -> Option<f64> {
        self.window.map(|(_, end)| end)
    }

    /// `true` when `time` lies within `[first start, last end]`, gaps included.
    pub fn is_active_at(&self, time: f64) -> bool {
        self.window.is_some_and(|(start, end)| start <= time && time <= end)
    }

    /// Sum of the cost of every owned entry.
    pub fn cost(&self) -> u64 {
        self.cost
    }

    /// Resolve the property value at `time`.
    ///
    /// Inside a command: that command's value; among overlapping commands the greatest in
    /// timeline order wins. In a gap or after the end: the end value of the latest-ending
    /// command that finished before `time`. Before the first command: its start value.
    pub fn value_at(&self, time: f64) -> StoryboardResult<V> {
        let Some(first) = self.first_live else {
            return Err(StoryboardError::evaluation("timeline has no driven value"));
        };

        let started = self
            .slots
            .partition_point(|s| s.entry.as_command().start_time() <= time);
        let Some((reach, reached_by)) = started.checked_sub(1).and_then(|i| self.reach[i]) else {
            return Ok(self.slots[first].entry.as_command().start_value().clone());
        };

        if reach < time {
            return Ok(self.slots[reached_by].entry.as_command().end_value().clone());
        }

        let containing = self.slots[..started]
            .iter()
            .rev()
            .filter(|s| s.entry.is_live())
            .map(|s| s.entry.as_command())
            .find(|c| time <= c.end_time());
        match containing {
            Some(c) => c.value_at(time),
            None => Err(StoryboardError::evaluation("timeline reach index is stale")),
        }
    }

    /// [`Self::value_at`], falling back to `default` when nothing drives the property.
    pub fn value_or(&self, time: f64, default: V) -> V {
        self.value_at(time).unwrap_or(default)
    }
}

impl CommandTimeline<CommandParameter> {
    /// Parameters are gated: on while `start <= time < end`, always on when `start == end`.
    pub fn parameter_at(&self, time: f64) -> bool {
        self.live().any(|c| {
            *c.start_value() != CommandParameter::None
                && (c.start_time() == c.end_time()
                    || (c.start_time() <= time && time < c.end_time()))
        })
    }
}

/// Type-erased view used to aggregate over a sprite's differently-typed timelines.
pub(crate) trait AnyTimeline {
    fn start_time(&self) -> Option<f64>;
    fn end_time(&self) -> Option<f64>;
    fn cost(&self) -> u64;
    fn has_overlap(&self) -> bool;
    fn trigger_group(&mut self, group: usize, time: f64) -> usize;
    fn untrigger_group(&mut self, group: usize) -> usize;
}

impl<V: CommandValue> AnyTimeline for CommandTimeline<V> {
    fn start_time(&self) -> Option<f64> {
        CommandTimeline::start_time(self)
    }

    fn end_time(&self) -> Option<f64> {
        CommandTimeline::end_time(self)
    }

    fn cost(&self) -> u64 {
        CommandTimeline::cost(self)
    }

    fn has_overlap(&self) -> bool {
        CommandTimeline::has_overlap(self)
    }

    fn trigger_group(&mut self, group: usize, time: f64) -> usize {
        CommandTimeline::trigger_group(self, group, time)
    }

    fn untrigger_group(&mut self, group: usize) -> usize {
        CommandTimeline::untrigger_group(self, group)
    }
}

fn overlaps<V: CommandValue>(a: &dyn TypedCommand<V>, b: &dyn TypedCommand<V>) -> bool {
    a.start_time() < b.end_time() && b.start_time() < a.end_time()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
