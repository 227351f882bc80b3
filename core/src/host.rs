//! Host engine interfaces
//!
//! The split-screen core never talks to a renderer directly. Each host engine
//! implements [`RenderHost`] to expose its camera/viewport primitive and
//! [`PlayerRoster`] to expose the players of the running session.

use std::fmt::Debug;

use glam::{Vec2, Vec3};

use crate::error::HostError;
use crate::layout::ViewportRect;

/// Maximum number of players (and split panes) the core handles
pub const MAX_PLAYERS: usize = 4;

/// Settings applied to a surface the core has to create itself
/// because the host offered no main surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDefaults {
    /// Solid background color (RGBA, 0.0-1.0)
    pub clear_color: [f32; 4],
    /// Half-height of the orthographic view volume in world units
    pub orthographic_size: f32,
    /// Sort order; higher draws later
    pub depth: f32,
    /// Normalized viewport rectangle
    pub rect: ViewportRect,
    /// Whether the surface starts enabled
    pub enabled: bool,
}

impl Default for SurfaceDefaults {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0, 1.0],
            orthographic_size: 20.0,
            depth: 1.0,
            rect: ViewportRect::FULLSCREEN,
            enabled: true,
        }
    }
}

/// Camera/viewport primitive of the host rendering engine.
///
/// A surface is one camera rendering into a normalized sub-rectangle of the
/// display. Handles are cheap copies; a handle may outlive the surface it
/// names (e.g. the host destroyed it on a scene change), which is what
/// [`is_alive`](RenderHost::is_alive) reports.
pub trait RenderHost {
    /// Handle to a host surface
    type Surface: Copy + Eq + Debug;

    /// Discover the host's default/main surface, if one exists.
    fn main_surface(&mut self) -> Option<Self::Surface>;

    /// Create a new surface configured with `defaults`.
    fn create_surface(
        &mut self,
        name: &str,
        defaults: &SurfaceDefaults,
    ) -> Result<Self::Surface, HostError>;

    /// Destroy a surface and release its resources.
    ///
    /// Destroying a dead handle is a no-op.
    fn destroy_surface(&mut self, surface: Self::Surface);

    /// Whether the handle still refers to a live surface
    fn is_alive(&self, surface: Self::Surface) -> bool;

    /// Enable or disable rendering for a surface
    fn set_enabled(&mut self, surface: Self::Surface, enabled: bool) -> Result<(), HostError>;

    /// Whether the surface is currently rendering
    fn is_enabled(&self, surface: Self::Surface) -> bool;

    /// Set the normalized viewport rectangle (origin bottom-left)
    fn set_rect(&mut self, surface: Self::Surface, rect: ViewportRect) -> Result<(), HostError>;

    /// Current normalized viewport rectangle
    fn rect(&self, surface: Self::Surface) -> Option<ViewportRect>;

    /// Sort order of the surface
    fn depth(&self, surface: Self::Surface) -> Result<f32, HostError>;

    /// Set the sort order of the surface; higher draws later
    fn set_depth(&mut self, surface: Self::Surface, depth: f32) -> Result<(), HostError>;

    /// World-space camera position
    fn position(&self, surface: Self::Surface) -> Result<Vec3, HostError>;

    /// Move the camera in world space
    fn set_position(&mut self, surface: Self::Surface, position: Vec3) -> Result<(), HostError>;

    /// Copy base rendering settings (projection, clear mode, culling) from `source`
    fn copy_settings(
        &mut self,
        target: Self::Surface,
        source: Self::Surface,
    ) -> Result<(), HostError>;

    /// Stop redirecting the surface into an offscreen texture so it renders to the display
    fn clear_target_texture(&mut self, surface: Self::Surface) -> Result<(), HostError>;
}

/// Source of player positions for the current session.
pub trait PlayerRoster {
    /// Number of players in the session
    fn player_count(&self) -> usize;

    /// World position of a player, or `None` if the player has no body right now
    fn player_position(&self, index: usize) -> Option<Vec2>;
}

impl PlayerRoster for [Option<Vec2>] {
    fn player_count(&self) -> usize {
        self.len()
    }

    fn player_position(&self, index: usize) -> Option<Vec2> {
        self.get(index).copied().flatten()
    }
}

impl PlayerRoster for Vec<Option<Vec2>> {
    fn player_count(&self) -> usize {
        self.len()
    }

    fn player_position(&self, index: usize) -> Option<Vec2> {
        self.as_slice().player_position(index)
    }
}

impl PlayerRoster for [Vec2] {
    fn player_count(&self) -> usize {
        self.len()
    }

    fn player_position(&self, index: usize) -> Option<Vec2> {
        self.get(index).copied()
    }
}

impl PlayerRoster for Vec<Vec2> {
    fn player_count(&self) -> usize {
        self.len()
    }

    fn player_position(&self, index: usize) -> Option<Vec2> {
        self.as_slice().player_position(index)
    }
}
