//! Viewport resource pool
//!
//! Owns the primary surface and the split panes. Nothing else in the crate
//! enables, disables or resizes a surface.

use glam::Vec3;
use smallvec::SmallVec;
use tracing::{debug, error, info, warn};

use crate::camera::smooth_toward;
use crate::error::{HostError, SplitScreenError};
use crate::host::{MAX_PLAYERS, RenderHost, SurfaceDefaults};
use crate::layout::{SplitConfiguration, ViewportRect, rect_for};
use crate::tracker::PositionTracker;


/// Name of the surface created when the host has no main surface
pub const FALLBACK_PRIMARY_NAME: &str = "SplitScreenMainCamera";

/// Rect given to freshly created panes until a layout is applied
const PLACEHOLDER_RECT: ViewportRect = ViewportRect::new(0.0, 0.0, 0.5, 0.5);

/// One split-screen pane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportPane<S> {
    /// Host surface backing the pane
    pub surface: S,
    /// Player this pane follows
    pub player: usize,
    /// Whether the pane is part of the applied layout
    pub enabled: bool,
    /// Normalized rectangle last assigned to the pane
    pub rect: ViewportRect,
}

#[derive(Debug, Clone, Copy)]
struct Primary<S> {
    surface: S,
    /// Created by us rather than discovered on the host
    owned: bool,
}

/// Pool of rendering surfaces backing the current layout
#[derive(Debug)]
pub struct ViewportPool<H: RenderHost> {
    host: H,
    primary: Option<Primary<H::Surface>>,
    panes: SmallVec<[ViewportPane<H::Surface>; MAX_PLAYERS]>,
    layout: SplitConfiguration,
    follow_rate: f32,
}

impl<H: RenderHost> ViewportPool<H> {
    /// Create an empty pool on top of `host`
    pub fn new(host: H, follow_rate: f32) -> Self {
        Self {
            host,
            primary: None,
            panes: SmallVec::new(),
            layout: SplitConfiguration::Single,
            follow_rate,
        }
    }

    /// Make sure a live primary surface is known.
    ///
    /// Returns `true` when the primary was acquired by this call (first use,
    /// or the previous one disappeared), `false` when the known one was reused.
    /// If the host offers no main surface, a fallback is created with
    /// [`SurfaceDefaults`] and owned by the pool.
    pub fn ensure_primary(&mut self) -> Result<bool, SplitScreenError> {
        if let Some(primary) = self.primary
            && self.host.is_alive(primary.surface)
        {
            self.clear_redirect(primary.surface);
            return Ok(false);
        }

        if self.primary.take().is_some() {
            warn!("Primary surface disappeared, rediscovering");
        }

        let primary = match self.host.main_surface() {
            Some(surface) => {
                debug!("Using host main surface {:?} as primary", surface);
                Primary {
                    surface,
                    owned: false,
                }
            }
            None => {
                warn!("Host has no main surface, creating {}", FALLBACK_PRIMARY_NAME);
                let surface = self
                    .host
                    .create_surface(FALLBACK_PRIMARY_NAME, &SurfaceDefaults::default())
                    .map_err(|e| {
                        error!("Failed to create fallback primary surface: {}", e);
                        SplitScreenError::NoPrimarySurface
                    })?;
                Primary {
                    surface,
                    owned: true,
                }
            }
        };

        self.clear_redirect(primary.surface);
        self.host
            .set_rect(primary.surface, ViewportRect::FULLSCREEN)
            .map_err(|e| SplitScreenError::host("reset primary rect", e))?;
        self.host
            .set_enabled(primary.surface, true)
            .map_err(|e| SplitScreenError::host("enable primary", e))?;

        self.primary = Some(primary);
        self.layout = SplitConfiguration::Single;
        Ok(true)
    }

    fn clear_redirect(&mut self, surface: H::Surface) {
        if let Err(e) = self.host.clear_target_texture(surface) {
            warn!("Could not clear target texture of primary surface: {}", e);
        }
    }

    /// Rebuild the panes from scratch.
    ///
    /// Destroys every pane, then creates `required` (clamped to 1-4) new
    /// ones seeded from the primary's settings, drawn above it and disabled.
    /// A pane that fails to create is skipped; the number of panes actually
    /// created is returned.
    pub fn reconcile(&mut self, required: usize) -> Result<usize, SplitScreenError> {
        let primary = self.primary_surface()?;
        self.destroy_panes();

        let required = required.clamp(1, MAX_PLAYERS);
        let depth = self
            .host
            .depth(primary)
            .map_err(|e| SplitScreenError::host("read primary depth", e))?
            + 1.0;
        let z = self
            .host
            .position(primary)
            .map_err(|e| SplitScreenError::host("read primary position", e))?
            .z;

        for index in 0..required {
            match self.create_pane(index, primary, depth, z) {
                Ok(pane) => self.panes.push(pane),
                Err(e) => warn!("Failed to create split pane {}: {}", index, e),
            }
        }

        if self.panes.len() < required {
            warn!(
                "Created {} of {} split panes",
                self.panes.len(),
                required
            );
        } else {
            info!("Created {} split panes", required);
        }
        Ok(self.panes.len())
    }

    fn create_pane(
        &mut self,
        index: usize,
        primary: H::Surface,
        depth: f32,
        z: f32,
    ) -> Result<ViewportPane<H::Surface>, HostError> {
        let defaults = SurfaceDefaults {
            depth,
            rect: PLACEHOLDER_RECT,
            enabled: false,
            ..Default::default()
        };
        let surface = self
            .host
            .create_surface(&format!("SplitCam_{index}"), &defaults)?;

        let configured = self
            .host
            .copy_settings(surface, primary)
            .and_then(|()| self.host.set_depth(surface, depth))
            .and_then(|()| self.host.set_rect(surface, PLACEHOLDER_RECT))
            .and_then(|()| self.host.set_enabled(surface, false))
            .and_then(|()| self.host.set_position(surface, Vec3::new(0.0, 0.0, z)));

        if let Err(e) = configured {
            self.host.destroy_surface(surface);
            return Err(e);
        }

        debug!("SplitCam_{} created with depth {}", index, depth);
        Ok(ViewportPane {
            surface,
            player: index,
            enabled: false,
            rect: PLACEHOLDER_RECT,
        })
    }

    /// Enable the surfaces for `config` and assign their rectangles.
    ///
    /// If the pool holds fewer panes than `config` needs, the layout degrades
    /// one step: to `Horizontal` with at least two panes, otherwise to
    /// `Single`. If nothing ends up enabled the primary is restored
    /// full-screen. Returns the configuration actually applied.
    pub fn apply_layout(
        &mut self,
        config: SplitConfiguration,
    ) -> Result<SplitConfiguration, SplitScreenError> {
        let primary = self.primary_surface()?;

        for pane in &mut self.panes {
            pane.enabled = false;
            if self.host.is_alive(pane.surface)
                && let Err(e) = self.host.set_enabled(pane.surface, false)
            {
                warn!("Failed to disable pane for player {}: {}", pane.player, e);
            }
        }

        let mut config = config;
        let available = self.panes.len();
        if config.is_split() && available < config.pane_count() {
            let degraded = if available >= 2 {
                SplitConfiguration::Horizontal
            } else {
                SplitConfiguration::Single
            };
            warn!(
                "Not enough panes for {:?} ({} of {}), using {:?}",
                config,
                available,
                config.pane_count(),
                degraded
            );
            config = degraded;
        }

        self.host
            .set_enabled(primary, !config.is_split())
            .map_err(|e| SplitScreenError::host("toggle primary", e))?;

        if config.is_split() {
            let host = &mut self.host;
            for (index, pane) in self.panes.iter_mut().enumerate() {
                let Some(rect) = rect_for(config, index) else {
                    break;
                };
                if !host.is_alive(pane.surface) {
                    warn!("Pane {} is missing, skipping it in {:?}", index, config);
                    continue;
                }
                match host
                    .set_rect(pane.surface, rect)
                    .and_then(|()| host.set_enabled(pane.surface, true))
                {
                    Ok(()) => {
                        pane.rect = rect;
                        pane.enabled = true;
                    }
                    Err(e) => warn!("Failed to activate pane {}: {}", index, e),
                }
            }
        } else {
            self.host
                .set_rect(primary, ViewportRect::FULLSCREEN)
                .map_err(|e| SplitScreenError::host("reset primary rect", e))?;
        }

        if !self.any_enabled(primary) {
            error!("No surface enabled after applying {:?}, restoring primary", config);
            self.restore_primary(primary)?;
            config = SplitConfiguration::Single;
        }

        debug!(
            "Applied {:?} with {} active panes",
            config,
            self.enabled_pane_count()
        );
        self.layout = config;
        Ok(config)
    }

    /// Move every active pane camera toward its player.
    ///
    /// The depth axis is pinned to the primary's. A pane that cannot be
    /// moved is skipped. Returns the number of panes moved.
    pub fn update_positions(&mut self, tracker: &PositionTracker, delta_seconds: f32) -> usize {
        let Some(primary) = self.primary else {
            return 0;
        };
        let z = match self.host.position(primary.surface) {
            Ok(position) => position.z,
            Err(e) => {
                warn!("Cannot read primary position, skipping camera update: {}", e);
                return 0;
            }
        };

        let mut moved = 0;
        for (index, pane) in self.panes.iter().enumerate() {
            if !pane.enabled || pane.player >= tracker.len() {
                continue;
            }

            let target = tracker.position_of(pane.player);
            let result = match self.host.position(pane.surface) {
                Ok(current) => {
                    let xy =
                        smooth_toward(current.truncate(), target, self.follow_rate, delta_seconds);
                    self.host.set_position(pane.surface, xy.extend(z))
                }
                Err(e) => Err(e),
            };

            match result {
                Ok(()) => moved += 1,
                Err(e) => warn!("Failed to move pane {} camera: {}", index, e),
            }
        }
        moved
    }

    /// Destroy every pane and go back to the primary at full-screen.
    ///
    /// The primary itself is kept; it may belong to the host.
    pub fn teardown(&mut self) {
        self.destroy_panes();
        self.layout = SplitConfiguration::Single;

        if let Some(primary) = self.primary
            && self.host.is_alive(primary.surface)
            && let Err(e) = self.restore_primary(primary.surface)
        {
            error!("Failed to restore primary surface: {}", e);
        }
    }

    /// Tear down and let go of the primary.
    ///
    /// A primary created by the pool is destroyed; one discovered on the host
    /// is left enabled at full-screen.
    pub fn release_primary(&mut self) {
        self.teardown();
        if let Some(primary) = self.primary.take()
            && primary.owned
        {
            self.host.destroy_surface(primary.surface);
        }
    }

    fn destroy_panes(&mut self) {
        for pane in self.panes.drain(..) {
            self.host.destroy_surface(pane.surface);
        }
    }

    fn restore_primary(&mut self, primary: H::Surface) -> Result<(), SplitScreenError> {
        self.host
            .set_rect(primary, ViewportRect::FULLSCREEN)
            .and_then(|()| self.host.set_enabled(primary, true))
            .map_err(|e| SplitScreenError::host("restore primary", e))
    }

    fn any_enabled(&self, primary: H::Surface) -> bool {
        self.host.is_enabled(primary)
            || self.panes.iter().any(|p| self.host.is_enabled(p.surface))
    }

    fn primary_surface(&self) -> Result<H::Surface, SplitScreenError> {
        self.primary
            .map(|p| p.surface)
            .ok_or(SplitScreenError::NoPrimarySurface)
    }

    /// The primary surface, once discovered
    pub fn primary(&self) -> Option<H::Surface> {
        self.primary.map(|p| p.surface)
    }

    /// Whether the primary was created by the pool
    pub fn owns_primary(&self) -> bool {
        self.primary.is_some_and(|p| p.owned)
    }

    /// Current panes, in pane order
    pub fn panes(&self) -> &[ViewportPane<H::Surface>] {
        &self.panes
    }

    /// Number of panes held (enabled or not)
    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    /// Number of panes taking part in the applied layout
    pub fn enabled_pane_count(&self) -> usize {
        self.panes.iter().filter(|p| p.enabled).count()
    }

    /// Layout last applied
    pub fn layout(&self) -> SplitConfiguration {
        self.layout
    }

    /// Camera approach rate per second
    pub fn follow_rate(&self) -> f32 {
        self.follow_rate
    }

    /// The render host
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The render host (mutable)
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consume the pool and hand the host back
    pub fn into_host(self) -> H {
        self.host
    }
}
