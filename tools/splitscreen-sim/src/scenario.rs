//! Scenario file format
//!
//! ```toml
//! delta = 0.016              # seconds per frame (optional)
//! environment_ready_at = 0   # frame at which the host reports it is loaded (optional)
//! main_surface = true        # whether the host starts with a main camera (optional)
//! display = [1920, 1080]     # display size used to report pane pixels (optional)
//!
//! [[frames]]
//! players = [[0.0, 0.0], [1200.0, 0.0]]
//! repeat = 30
//!
//! [[frames]]
//! players = [[0.0, 0.0], [700.0, 0.0]]
//! fail_creations = true      # surface creation fails during this frame
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec2;
use serde::Deserialize;

/// A scripted sequence of player positions
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    /// Seconds per frame
    #[serde(default = "default_delta")]
    pub delta: f32,
    /// Frame index at which the environment-loaded signal fires
    #[serde(default)]
    pub environment_ready_at: usize,
    /// Whether the host starts with its own main surface
    #[serde(default = "default_true")]
    pub main_surface: bool,
    /// Display width and height in pixels
    #[serde(default = "default_display")]
    pub display: [u32; 2],
    /// Frame groups in playback order
    #[serde(default)]
    pub frames: Vec<FrameGroup>,
}

/// One group of identical frames
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FrameGroup {
    /// Position of each player, `[x, y]`
    pub players: Vec<Vec2>,
    /// Number of frames this group lasts
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    /// Make every surface creation fail during these frames
    #[serde(default)]
    pub fail_creations: bool,
}

fn default_delta() -> f32 {
    1.0 / 60.0
}
fn default_true() -> bool {
    true
}
fn default_display() -> [u32; 2] {
    [1920, 1080]
}
fn default_repeat() -> u32 {
    1
}

impl Scenario {
    /// Load scenario from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse scenario from string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse scenario")
    }

    /// Every frame in playback order, with repeats expanded
    pub fn frames(&self) -> impl Iterator<Item = &FrameGroup> {
        self.frames
            .iter()
            .flat_map(|group| std::iter::repeat_n(group, group.repeat as usize))
    }

    /// Total number of frames
    pub fn frame_count(&self) -> usize {
        self.frames.iter().map(|group| group.repeat as usize).sum()
    }
}
