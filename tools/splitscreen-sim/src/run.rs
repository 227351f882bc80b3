//! Scenario playback against a headless host

use serde::Serialize;
use splitscreen_core::{
    Config, FrameListener, HeadlessHost, PixelRect, SplitConfiguration, SplitScreenPlugin,
    TickOutcome, ViewportRect,
};
use tracing::debug;

use crate::scenario::Scenario;

/// A change of the on-screen layout observed during playback
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    /// Frame index at which the change happened
    pub frame: usize,
    /// Layout on screen before the frame
    pub from: SplitConfiguration,
    /// Layout on screen after the frame
    pub to: SplitConfiguration,
    /// Layout the policy asked for; differs from `to` when panes are missing
    pub wanted: SplitConfiguration,
    /// Panes enabled after the change
    pub panes: usize,
    /// Pixel placement of every rendering surface after the change
    pub rects: Vec<PixelRect>,
}

/// Result of playing a whole scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Frames played
    pub frames: usize,
    /// Ticks ignored (not ready, or fewer than two players)
    pub skipped: usize,
    /// Ticks that failed and merged back to a single view
    pub recoveries: usize,
    /// On-screen layout changes in playback order
    pub transitions: Vec<Transition>,
    /// Layout the policy settled on
    pub final_configuration: SplitConfiguration,
    /// Layout on screen at the end
    pub final_displayed: SplitConfiguration,
    /// Surfaces still alive on the host after shutdown
    pub leftover_surfaces: usize,
}

/// Play `scenario` frame by frame and collect what the controller did
pub fn play(scenario: &Scenario, config: Config, delta_override: Option<f32>) -> Report {
    let host = if scenario.main_surface {
        HeadlessHost::with_main_surface()
    } else {
        HeadlessHost::new()
    };
    let delta = delta_override.unwrap_or(scenario.delta);
    let [width, height] = scenario.display;

    let mut plugin = SplitScreenPlugin::new(host, config);
    let mut transitions = Vec::new();
    let mut skipped = 0;
    let mut recoveries = 0;
    let mut frames = 0;
    let mut displayed = SplitConfiguration::Single;

    for (index, frame) in scenario.frames().enumerate() {
        if index == scenario.environment_ready_at {
            plugin.on_environment_loaded();
        }
        plugin
            .controller_mut()
            .pool_mut()
            .host_mut()
            .set_fail_creations(frame.fail_creations);

        let outcome = plugin.on_frame(&frame.players, delta);
        debug!("frame {}: {:?}", index, outcome);
        match outcome {
            TickOutcome::Skipped => skipped += 1,
            TickOutcome::Recovered => recoveries += 1,
            TickOutcome::Unchanged(_) | TickOutcome::Changed { .. } => {}
        }

        let controller = plugin.controller();
        let now = controller.displayed();
        if now != displayed {
            let pool = controller.pool();
            let mut rects: Vec<PixelRect> = pool
                .panes()
                .iter()
                .filter(|pane| pane.enabled)
                .map(|pane| pane.rect.to_pixels(width, height))
                .collect();
            if rects.is_empty() {
                rects.push(ViewportRect::FULLSCREEN.to_pixels(width, height));
            }

            transitions.push(Transition {
                frame: index,
                from: displayed,
                to: now,
                wanted: controller.current(),
                panes: pool.enabled_pane_count(),
                rects,
            });
            displayed = now;
        }
        frames += 1;
    }

    let final_configuration = plugin.controller().current();
    let final_displayed = plugin.controller().displayed();
    let host = plugin.shutdown();

    Report {
        frames,
        skipped,
        recoveries,
        transitions,
        final_configuration,
        final_displayed,
        leftover_surfaces: host.live_count(),
    }
}
