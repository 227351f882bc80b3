//! Plugin lifecycle
//!
//! Glue between a host engine's lifecycle and the controller: load the
//! config at startup, wait for the environment, forward every frame, and
//! restore the display on shutdown.

use tracing::{info, warn};

use crate::config::{self, Config, SplitScreenConfig};
use crate::controller::{SplitScreenController, TickOutcome};
use crate::host::{PlayerRoster, RenderHost};

/// Display name used in log messages
pub const PLUGIN_NAME: &str = "Split Screen";

/// Receives one call per host frame
pub trait FrameListener {
    /// Called once per rendered frame with the session's players
    fn on_frame(&mut self, roster: &dyn PlayerRoster, delta_seconds: f32) -> TickOutcome;
}

/// Split-screen plugin bound to one host
#[derive(Debug)]
pub struct SplitScreenPlugin<H: RenderHost> {
    config: SplitScreenConfig,
    controller: SplitScreenController<H>,
}

impl<H: RenderHost> SplitScreenPlugin<H> {
    /// Start the plugin with an explicit configuration.
    ///
    /// Suspicious settings are logged but used as given.
    pub fn new(host: H, config: Config) -> Self {
        info!("[{}] Initialising", PLUGIN_NAME);

        let config = config.splitscreen;
        for warning in config.validate() {
            warn!("[{}] {}", PLUGIN_NAME, warning);
        }

        let controller = SplitScreenController::new(host, &config);
        info!(
            "[{}] Ready (split at {}, merge at {}, layout {:?})",
            PLUGIN_NAME, config.split_threshold, config.merge_threshold, config.default_layout
        );
        Self { config, controller }
    }

    /// Start the plugin with the configuration from the platform config directory
    pub fn load(host: H) -> Self {
        Self::new(host, config::load())
    }

    /// The host finished loading; surfaces may be touched from now on
    pub fn on_environment_loaded(&mut self) {
        self.controller.mark_ready();
    }

    /// Restore the single view and hand the host back
    pub fn shutdown(mut self) -> H {
        info!("[{}] Cleaning up", PLUGIN_NAME);
        self.controller.shutdown();
        self.controller.into_host()
    }

    /// Settings in effect
    pub fn config(&self) -> &SplitScreenConfig {
        &self.config
    }

    /// The controller
    pub fn controller(&self) -> &SplitScreenController<H> {
        &self.controller
    }

    /// The controller (mutable)
    pub fn controller_mut(&mut self) -> &mut SplitScreenController<H> {
        &mut self.controller
    }
}

impl<H: RenderHost> FrameListener for SplitScreenPlugin<H> {
    fn on_frame(&mut self, roster: &dyn PlayerRoster, delta_seconds: f32) -> TickOutcome {
        self.controller.tick(roster, delta_seconds)
    }
}
