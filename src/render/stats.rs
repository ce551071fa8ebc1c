/// Per-frame cost and coverage counters, owned by one render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameStats {
    /// Sprites active at the frame time, drawn or not.
    pub sprite_count: u64,
    /// Command cost of the active sprites.
    pub command_count: u64,
    /// Command cost of the sprites that actually reach the screen.
    pub effective_command_count: u64,
    /// Some active sprite mixes commands that drive the same property two ways.
    pub incompatible_commands: bool,
    /// Some active sprite has overlapping commands on one property.
    pub overlapped_commands: bool,
    /// Sum of per-sprite coverage of the reference screen, each term in `[0, 1]`.
    pub screen_fill: f64,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn to_json_pretty(&self) -> crate::foundation::error::StoryboardResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::foundation::error::StoryboardError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/stats.rs"]
mod tests;
