//! Split Screen Core - distance-driven split-screen for local multiplayer
//!
//! Shares one display between up to four co-located players. While the
//! players are close together they share a single full-screen view; when
//! they drift apart the display splits into 2, 3 or 4 panes, each following
//! one player, and merges back once they regroup.
//!
//! # Architecture
//!
//! - [`PositionTracker`] - Per-frame snapshot of player positions
//! - [`LayoutPolicy`] - Split/merge decision with hysteresis
//! - [`rect_for`] - Normalized rectangle of each pane per configuration
//! - [`ViewportPool`] - Owns the primary surface and the split panes
//! - [`SplitScreenController`] - Per-frame orchestration and recovery
//! - [`RenderHost`] / [`PlayerRoster`] - Implemented by the host engine
//! - [`SplitScreenPlugin`] - Startup, readiness, frame hook and shutdown

pub mod camera;
pub mod config;
pub mod controller;
pub mod error;
pub mod headless;
pub mod host;
pub mod layout;
pub mod plugin;
pub mod pool;
pub mod tracker;

// Re-export core types
pub use config::{Config, SplitScreenConfig};
pub use controller::{Readiness, SplitScreenController, TickOutcome};
pub use error::{ConfigError, HostError, SplitScreenError};
pub use headless::{HeadlessHost, HeadlessSurface, SurfaceId};
pub use host::{MAX_PLAYERS, PlayerRoster, RenderHost, SurfaceDefaults};
pub use layout::{
    DistanceSource, LayoutPolicy, LayoutPreference, PixelRect, SplitConfiguration, ViewportRect,
    rect_for,
};
pub use plugin::{FrameListener, PLUGIN_NAME, SplitScreenPlugin};
pub use pool::{ViewportPane, ViewportPool};
pub use tracker::PositionTracker;
