//! Split-screen controller
//!
//! Driven once per host frame. Tracks the players, asks the layout policy for
//! the target configuration and reconciles the viewport pool when it changes.
//! Any failure inside a tick merges the display back to a single full-screen
//! view; the next tick starts over from there.

use tracing::{debug, error, info};

use crate::config::SplitScreenConfig;
use crate::error::SplitScreenError;
use crate::host::{PlayerRoster, RenderHost};
use crate::layout::{LayoutPolicy, SplitConfiguration};
use crate::pool::ViewportPool;
use crate::tracker::PositionTracker;

#[cfg(test)]
mod tests;

/// Whether the host environment is far enough along for the controller to
/// touch its surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Readiness {
    /// Waiting for the host to finish loading; ticks are ignored
    #[default]
    NotReady,
    /// Ticks are processed
    Ready,
}

/// What a call to [`SplitScreenController::tick`] did, in terms of the
/// policy's configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to do: not ready, or fewer than two players
    Skipped,
    /// The configuration stayed the same
    Unchanged(SplitConfiguration),
    /// The configuration changed
    Changed {
        /// Configuration before the tick
        from: SplitConfiguration,
        /// Configuration after the tick
        to: SplitConfiguration,
    },
    /// A step failed and the display was merged back to a single view
    Recovered,
}

/// Orchestrates tracking, layout decisions and the viewport pool
#[derive(Debug)]
pub struct SplitScreenController<H: RenderHost> {
    policy: LayoutPolicy,
    tracker: PositionTracker,
    pool: ViewportPool<H>,
    current: SplitConfiguration,
    readiness: Readiness,
}

impl<H: RenderHost> SplitScreenController<H> {
    /// Create a controller on top of `host`.
    ///
    /// The controller starts [`Readiness::NotReady`]; call
    /// [`mark_ready`](Self::mark_ready) once the host environment is loaded.
    pub fn new(host: H, config: &SplitScreenConfig) -> Self {
        Self {
            policy: LayoutPolicy::from_config(config),
            tracker: PositionTracker::new(),
            pool: ViewportPool::new(host, config.follow_rate),
            current: SplitConfiguration::Single,
            readiness: Readiness::NotReady,
        }
    }

    /// Signal that the host environment is fully loaded
    pub fn mark_ready(&mut self) {
        if self.readiness == Readiness::NotReady {
            debug!("Host environment ready, split-screen enabled");
        }
        self.readiness = Readiness::Ready;
    }

    /// Process one host frame.
    ///
    /// Never fails: an error in any step is logged and answered with a full
    /// merge to [`SplitConfiguration::Single`].
    pub fn tick<R: PlayerRoster + ?Sized>(&mut self, roster: &R, delta_seconds: f32) -> TickOutcome {
        if self.readiness == Readiness::NotReady || roster.player_count() <= 1 {
            return TickOutcome::Skipped;
        }

        match self.step(roster, delta_seconds) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Split-screen update failed, merging to single view: {}", e);
                self.current = SplitConfiguration::Single;
                self.pool.teardown();
                TickOutcome::Recovered
            }
        }
    }

    fn step<R: PlayerRoster + ?Sized>(
        &mut self,
        roster: &R,
        delta_seconds: f32,
    ) -> Result<TickOutcome, SplitScreenError> {
        let acquired = self.pool.ensure_primary()?;
        self.tracker.update(roster);

        let previous = self.current;
        let target = self
            .policy
            .decide(roster.player_count(), previous, &self.tracker);
        let needed = target.pane_count();

        // Panes are rebuilt on a configuration change, when a new primary
        // invalidates panes seeded from the old one, or when no pane could be
        // created at all for the current split
        let starved = needed > 0 && self.pool.pane_count() == 0;
        if target != previous || acquired || starved {
            if needed > 0 && (acquired || self.pool.pane_count() < needed) {
                self.pool.reconcile(needed)?;
            }
            let applied = self.pool.apply_layout(target)?;
            if applied != target {
                debug!("Showing {:?} while {:?} is wanted", applied, target);
            }
            self.current = target;
        }

        if self.pool.layout().is_split() {
            self.pool.update_positions(&self.tracker, delta_seconds);
        }

        if self.current == previous {
            Ok(TickOutcome::Unchanged(self.current))
        } else {
            info!("Split configuration {:?} -> {:?}", previous, self.current);
            Ok(TickOutcome::Changed {
                from: previous,
                to: self.current,
            })
        }
    }

    /// Merge to a single view and release the primary surface if it was created here
    pub fn shutdown(&mut self) {
        self.pool.release_primary();
        self.current = SplitConfiguration::Single;
        self.readiness = Readiness::NotReady;
    }

    /// Configuration chosen by the layout policy
    pub fn current(&self) -> SplitConfiguration {
        self.current
    }

    /// Configuration actually on screen.
    ///
    /// Differs from [`current`](Self::current) while too few panes exist for
    /// the chosen layout.
    pub fn displayed(&self) -> SplitConfiguration {
        self.pool.layout()
    }

    /// Current readiness state
    pub fn readiness(&self) -> Readiness {
        self.readiness
    }

    /// Layout policy in use
    pub fn policy(&self) -> &LayoutPolicy {
        &self.policy
    }

    /// Player positions from the last processed tick
    pub fn tracker(&self) -> &PositionTracker {
        &self.tracker
    }

    /// The viewport pool
    pub fn pool(&self) -> &ViewportPool<H> {
        &self.pool
    }

    /// The viewport pool (mutable, for hosts that need to reach their surfaces)
    pub fn pool_mut(&mut self) -> &mut ViewportPool<H> {
        &mut self.pool
    }

    /// Consume the controller and hand the host back
    pub fn into_host(self) -> H {
        self.pool.into_host()
    }
}
