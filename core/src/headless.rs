//! Headless render host
//!
//! An in-memory [`RenderHost`] that records surface state instead of drawing.
//! Used by the simulator and by tests, and handy for hosts that want to dry-run
//! a layout before touching real cameras. Failures can be injected to exercise
//! the recovery paths.

use glam::Vec3;
use hashbrown::{HashMap, HashSet};

use crate::error::HostError;
use crate::host::{RenderHost, SurfaceDefaults};
use crate::layout::ViewportRect;

/// Handle to a headless surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u32);

/// Recorded state of one headless surface
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessSurface {
    /// Name given at creation
    pub name: String,
    /// Whether the surface renders
    pub enabled: bool,
    /// Normalized viewport rectangle
    pub rect: ViewportRect,
    /// Sort order
    pub depth: f32,
    /// World-space camera position
    pub position: Vec3,
    /// Background color
    pub clear_color: [f32; 4],
    /// Orthographic half-height
    pub orthographic_size: f32,
    /// Whether output is redirected to an offscreen texture
    pub has_target_texture: bool,
    /// Surface whose settings were last copied into this one
    pub copied_from: Option<SurfaceId>,
}

impl HeadlessSurface {
    fn from_defaults(name: &str, defaults: &SurfaceDefaults) -> Self {
        Self {
            name: name.to_string(),
            enabled: defaults.enabled,
            rect: defaults.rect,
            depth: defaults.depth,
            position: Vec3::ZERO,
            clear_color: defaults.clear_color,
            orthographic_size: defaults.orthographic_size,
            has_target_texture: false,
            copied_from: None,
        }
    }
}

/// In-memory render host
#[derive(Debug, Default)]
pub struct HeadlessHost {
    surfaces: HashMap<SurfaceId, HeadlessSurface>,
    main: Option<SurfaceId>,
    next_id: u32,
    fail_creations: bool,
    failing_creations: u32,
    failing_moves: HashSet<SurfaceId>,
    created: u32,
    destroyed: u32,
}

impl HeadlessHost {
    /// Host without any surface; the core has to create its own primary
    pub fn new() -> Self {
        Self::default()
    }

    /// Host that already owns a main surface, like a running game would
    pub fn with_main_surface() -> Self {
        let mut host = Self::new();
        let main = host.insert(HeadlessSurface::from_defaults(
            "MainCamera",
            &SurfaceDefaults {
                depth: -1.0,
                ..Default::default()
            },
        ));
        if let Some(surface) = host.surfaces.get_mut(&main) {
            surface.position = Vec3::new(0.0, 0.0, -10.0);
        }
        host.main = Some(main);
        host.created = 0;
        host
    }

    fn insert(&mut self, surface: HeadlessSurface) -> SurfaceId {
        let id = SurfaceId(self.next_id);
        self.next_id += 1;
        self.surfaces.insert(id, surface);
        self.created += 1;
        id
    }

    fn get_mut(&mut self, id: SurfaceId) -> Result<&mut HeadlessSurface, HostError> {
        self.surfaces.get_mut(&id).ok_or(HostError::InvalidSurface)
    }

    fn get(&self, id: SurfaceId) -> Result<&HeadlessSurface, HostError> {
        self.surfaces.get(&id).ok_or(HostError::InvalidSurface)
    }

    /// Make every surface creation fail until switched off
    pub fn set_fail_creations(&mut self, fail: bool) {
        self.fail_creations = fail;
    }

    /// Make the next `count` surface creations fail
    pub fn fail_next_creations(&mut self, count: u32) {
        self.failing_creations = count;
    }

    /// Make camera moves of `surface` fail
    pub fn fail_moves_for(&mut self, surface: SurfaceId) {
        self.failing_moves.insert(surface);
    }

    /// Redirect a surface into an offscreen texture
    pub fn redirect_to_texture(&mut self, surface: SurfaceId) {
        if let Some(s) = self.surfaces.get_mut(&surface) {
            s.has_target_texture = true;
        }
    }

    /// Destroy a surface behind the core's back (e.g. on a scene change)
    pub fn kill(&mut self, surface: SurfaceId) {
        self.surfaces.remove(&surface);
    }

    /// The host's own main surface, if it has one
    pub fn main(&self) -> Option<SurfaceId> {
        self.main
    }

    /// State of a surface
    pub fn surface(&self, id: SurfaceId) -> Option<&HeadlessSurface> {
        self.surfaces.get(&id)
    }

    /// Ids of all enabled surfaces, in creation order
    pub fn enabled_surfaces(&self) -> Vec<SurfaceId> {
        let mut ids: Vec<SurfaceId> = self
            .surfaces
            .iter()
            .filter(|(_, s)| s.enabled)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    /// Number of live surfaces
    pub fn live_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Number of surfaces created through [`RenderHost::create_surface`]
    pub fn created_count(&self) -> u32 {
        self.created
    }

    /// Number of surfaces destroyed through [`RenderHost::destroy_surface`]
    pub fn destroyed_count(&self) -> u32 {
        self.destroyed
    }
}

impl RenderHost for HeadlessHost {
    type Surface = SurfaceId;

    fn main_surface(&mut self) -> Option<SurfaceId> {
        self.main.filter(|id| self.surfaces.contains_key(id))
    }

    fn create_surface(
        &mut self,
        name: &str,
        defaults: &SurfaceDefaults,
    ) -> Result<SurfaceId, HostError> {
        if self.fail_creations {
            return Err(HostError::Backend(format!("cannot create {name}")));
        }
        if self.failing_creations > 0 {
            self.failing_creations -= 1;
            return Err(HostError::Unavailable(format!("no capacity for {name}")));
        }
        Ok(self.insert(HeadlessSurface::from_defaults(name, defaults)))
    }

    fn destroy_surface(&mut self, surface: SurfaceId) {
        if self.surfaces.remove(&surface).is_some() {
            self.destroyed += 1;
        }
        self.failing_moves.remove(&surface);
    }

    fn is_alive(&self, surface: SurfaceId) -> bool {
        self.surfaces.contains_key(&surface)
    }

    fn set_enabled(&mut self, surface: SurfaceId, enabled: bool) -> Result<(), HostError> {
        self.get_mut(surface)?.enabled = enabled;
        Ok(())
    }

    fn is_enabled(&self, surface: SurfaceId) -> bool {
        self.surfaces.get(&surface).is_some_and(|s| s.enabled)
    }

    fn set_rect(&mut self, surface: SurfaceId, rect: ViewportRect) -> Result<(), HostError> {
        self.get_mut(surface)?.rect = rect;
        Ok(())
    }

    fn rect(&self, surface: SurfaceId) -> Option<ViewportRect> {
        self.surfaces.get(&surface).map(|s| s.rect)
    }

    fn depth(&self, surface: SurfaceId) -> Result<f32, HostError> {
        Ok(self.get(surface)?.depth)
    }

    fn set_depth(&mut self, surface: SurfaceId, depth: f32) -> Result<(), HostError> {
        self.get_mut(surface)?.depth = depth;
        Ok(())
    }

    fn position(&self, surface: SurfaceId) -> Result<Vec3, HostError> {
        Ok(self.get(surface)?.position)
    }

    fn set_position(&mut self, surface: SurfaceId, position: Vec3) -> Result<(), HostError> {
        if self.failing_moves.contains(&surface) {
            return Err(HostError::Backend(format!("transform of {surface:?} is locked")));
        }
        self.get_mut(surface)?.position = position;
        Ok(())
    }

    fn copy_settings(&mut self, target: SurfaceId, source: SurfaceId) -> Result<(), HostError> {
        let src = self.get(source)?.clone();
        let dst = self.get_mut(target)?;
        dst.clear_color = src.clear_color;
        dst.orthographic_size = src.orthographic_size;
        dst.depth = src.depth;
        dst.copied_from = Some(source);
        Ok(())
    }

    fn clear_target_texture(&mut self, surface: SurfaceId) -> Result<(), HostError> {
        self.get_mut(surface)?.has_target_texture = false;
        Ok(())
    }
}
