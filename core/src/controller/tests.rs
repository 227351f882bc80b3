//! Controller tests

use glam::Vec2;

use crate::config::SplitScreenConfig;
use crate::headless::HeadlessHost;
use crate::host::RenderHost;
use crate::layout::{LayoutPreference, SplitConfiguration, ViewportRect};

use super::{Readiness, SplitScreenController, TickOutcome};

const DT: f32 = 1.0 / 60.0;

fn controller_with(host: HeadlessHost, config: SplitScreenConfig) -> SplitScreenController<HeadlessHost> {
    let mut controller = SplitScreenController::new(host, &config);
    controller.mark_ready();
    controller
}

fn controller() -> SplitScreenController<HeadlessHost> {
    controller_with(HeadlessHost::with_main_surface(), SplitScreenConfig::default())
}

/// Two players separated vertically by `distance`
fn pair(distance: f32) -> Vec<Vec2> {
    vec![Vec2::ZERO, Vec2::new(0.0, distance)]
}

/// Enabled panes match the displayed layout and the primary renders only when merged
fn assert_invariants(controller: &SplitScreenController<HeadlessHost>) {
    let pool = controller.pool();
    let displayed = controller.displayed();
    assert_eq!(pool.enabled_pane_count(), displayed.pane_count());
    let primary = pool.primary().expect("primary discovered");
    assert_eq!(pool.host().is_enabled(primary), !displayed.is_split());
    assert!(!pool.host().enabled_surfaces().is_empty());
}

// ============================================================================
// Gating Tests
// ============================================================================

#[test]
fn test_not_ready_ignores_ticks() {
    let mut controller =
        SplitScreenController::new(HeadlessHost::with_main_surface(), &SplitScreenConfig::default());
    assert_eq!(controller.readiness(), Readiness::NotReady);

    assert_eq!(controller.tick(&pair(5000.0), DT), TickOutcome::Skipped);
    assert_eq!(controller.pool().primary(), None);

    controller.mark_ready();
    assert_eq!(controller.readiness(), Readiness::Ready);
    assert!(matches!(
        controller.tick(&pair(5000.0), DT),
        TickOutcome::Changed { .. }
    ));
}

#[test]
fn test_single_player_is_noop() {
    let config = SplitScreenConfig {
        force_always_split: true,
        split_threshold: 0.0,
        merge_threshold: 0.0,
        ..Default::default()
    };
    let mut controller = controller_with(HeadlessHost::with_main_surface(), config);

    for roster in [vec![], vec![Vec2::new(1.0e6, 1.0e6)]] {
        assert_eq!(controller.tick(&roster, DT), TickOutcome::Skipped);
    }
    assert_eq!(controller.current(), SplitConfiguration::Single);
    assert_eq!(controller.pool().primary(), None);
    assert_eq!(controller.pool().host().created_count(), 0);
}

#[test]
fn test_player_leaving_keeps_layout() {
    let mut controller = controller();
    controller.tick(&pair(5000.0), DT);
    assert!(controller.current().is_split());

    assert_eq!(
        controller.tick(&vec![Vec2::ZERO], DT),
        TickOutcome::Skipped
    );
    assert!(controller.current().is_split());
}

// ============================================================================
// Split / Merge Tests
// ============================================================================

#[test]
fn test_close_players_stay_single() {
    let mut controller = controller();
    assert_eq!(
        controller.tick(&pair(100.0), DT),
        TickOutcome::Unchanged(SplitConfiguration::Single)
    );
    assert_invariants(&controller);
    assert_eq!(controller.pool().pane_count(), 0);
}

#[test]
fn test_hysteresis() {
    let mut controller = controller();

    assert_eq!(
        controller.tick(&pair(1200.0), DT),
        TickOutcome::Changed {
            from: SplitConfiguration::Single,
            to: SplitConfiguration::Horizontal,
        }
    );
    assert_invariants(&controller);

    // Below the split threshold but above the merge threshold
    assert_eq!(
        controller.tick(&pair(900.0), DT),
        TickOutcome::Unchanged(SplitConfiguration::Horizontal)
    );
    assert_invariants(&controller);

    assert_eq!(
        controller.tick(&pair(700.0), DT),
        TickOutcome::Changed {
            from: SplitConfiguration::Horizontal,
            to: SplitConfiguration::Single,
        }
    );
    assert_invariants(&controller);
    let primary = controller.pool().primary().unwrap();
    assert_eq!(
        controller.pool().host().rect(primary),
        Some(ViewportRect::FULLSCREEN)
    );

    // Coming back to 900 from a merged view does not split
    assert_eq!(
        controller.tick(&pair(900.0), DT),
        TickOutcome::Unchanged(SplitConfiguration::Single)
    );
}

#[test]
fn test_automatic_orientation() {
    let config = SplitScreenConfig {
        split_threshold: 5.0,
        merge_threshold: 2.0,
        ..Default::default()
    };

    let mut controller = controller_with(HeadlessHost::with_main_surface(), config);
    controller.tick(&vec![Vec2::ZERO, Vec2::new(10.0, 0.0)], DT);
    assert_eq!(controller.current(), SplitConfiguration::Vertical);

    let mut controller = controller_with(HeadlessHost::with_main_surface(), config);
    controller.tick(&vec![Vec2::ZERO, Vec2::new(0.0, 10.0)], DT);
    assert_eq!(controller.current(), SplitConfiguration::Horizontal);
}

#[test]
fn test_orientation_switch_reuses_panes() {
    let mut controller = controller();
    controller.tick(&vec![Vec2::ZERO, Vec2::new(0.0, 2000.0)], DT);
    assert_eq!(controller.current(), SplitConfiguration::Horizontal);
    let created = controller.pool().host().created_count();

    controller.tick(&vec![Vec2::ZERO, Vec2::new(2000.0, 0.0)], DT);
    assert_eq!(controller.current(), SplitConfiguration::Vertical);
    assert_eq!(controller.pool().host().created_count(), created);
    assert_invariants(&controller);
}

#[test]
fn test_manual_three_way_with_two_players() {
    let config = SplitScreenConfig {
        default_layout: LayoutPreference::ThreeWay,
        ..Default::default()
    };
    let mut controller = controller_with(HeadlessHost::with_main_surface(), config);
    controller.tick(&pair(5000.0), DT);
    assert_eq!(controller.current(), SplitConfiguration::Horizontal);
    assert_invariants(&controller);
}

#[test]
fn test_force_split_ignores_distance() {
    let config = SplitScreenConfig {
        force_always_split: true,
        ..Default::default()
    };
    let mut controller = controller_with(HeadlessHost::with_main_surface(), config);
    controller.tick(&pair(0.0), DT);
    assert_eq!(controller.current(), SplitConfiguration::Horizontal);
}

#[test]
fn test_player_joining_grows_pool() {
    let mut controller = controller();
    let three = vec![Vec2::ZERO, Vec2::new(3000.0, 0.0), Vec2::new(0.0, 3000.0)];
    controller.tick(&three, DT);
    assert_eq!(controller.current(), SplitConfiguration::ThreeWay);
    assert_eq!(controller.pool().pane_count(), 3);
    assert_invariants(&controller);

    let mut four = three.clone();
    four.push(Vec2::new(3000.0, 3000.0));
    controller.tick(&four, DT);
    assert_eq!(controller.current(), SplitConfiguration::FourWay);
    assert_eq!(controller.pool().pane_count(), 4);
    assert_invariants(&controller);

    // Dropping back to three players reuses the four panes
    let created = controller.pool().host().created_count();
    controller.tick(&three, DT);
    assert_eq!(controller.current(), SplitConfiguration::ThreeWay);
    assert_eq!(controller.pool().pane_count(), 4);
    assert_eq!(controller.pool().host().created_count(), created);
    assert_invariants(&controller);
}

#[test]
fn test_steady_split_does_not_rebuild() {
    let mut controller = controller();
    controller.tick(&pair(5000.0), DT);
    let created = controller.pool().host().created_count();

    for _ in 0..10 {
        controller.tick(&pair(5000.0), DT);
    }
    assert_eq!(controller.pool().host().created_count(), created);
}

#[test]
fn test_pane_cameras_follow_players() {
    let mut controller = controller();
    let roster = vec![Vec2::new(0.0, 0.0), Vec2::new(0.0, 2000.0)];
    for _ in 0..300 {
        controller.tick(&roster, DT);
    }

    let pool = controller.pool();
    let follower = pool.panes()[1].surface;
    let position = pool.host().position(follower).unwrap();
    assert!(position.truncate().distance(Vec2::new(0.0, 2000.0)) < 1.0);
    assert_eq!(
        position.z,
        pool.host().position(pool.primary().unwrap()).unwrap().z
    );
}

// ============================================================================
// Recovery Tests
// ============================================================================

#[test]
fn test_pane_creation_failure_converges_to_single() {
    let mut host = HeadlessHost::with_main_surface();
    host.set_fail_creations(true);
    let mut controller = controller_with(host, SplitScreenConfig::default());

    for _ in 0..5 {
        controller.tick(&pair(5000.0), DT);
    }
    assert_eq!(controller.current(), SplitConfiguration::Horizontal);
    assert_eq!(controller.displayed(), SplitConfiguration::Single);
    assert_eq!(controller.pool().host().created_count(), 0);
    assert_invariants(&controller);
    let primary = controller.pool().primary().unwrap();
    assert_eq!(
        controller.pool().host().rect(primary),
        Some(ViewportRect::FULLSCREEN)
    );

    // Creation works again: the next tick splits
    controller.pool_mut().host_mut().set_fail_creations(false);
    assert_eq!(
        controller.tick(&pair(5000.0), DT),
        TickOutcome::Unchanged(SplitConfiguration::Horizontal)
    );
    assert_eq!(controller.displayed(), SplitConfiguration::Horizontal);
    assert_invariants(&controller);
}

#[test]
fn test_partial_pane_failure_degrades() {
    let mut host = HeadlessHost::with_main_surface();
    host.fail_next_creations(1);
    let mut controller = controller_with(host, SplitScreenConfig::default());

    let three = vec![Vec2::ZERO, Vec2::new(3000.0, 0.0), Vec2::new(0.0, 3000.0)];
    assert_eq!(
        controller.tick(&three, DT),
        TickOutcome::Changed {
            from: SplitConfiguration::Single,
            to: SplitConfiguration::ThreeWay,
        }
    );
    assert_eq!(controller.displayed(), SplitConfiguration::Horizontal);
    assert_invariants(&controller);

    // Regrouping and splitting again rebuilds the pool with all three panes
    controller.tick(&vec![Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)], DT);
    assert_eq!(controller.displayed(), SplitConfiguration::Single);
    controller.tick(&three, DT);
    assert_eq!(controller.current(), SplitConfiguration::ThreeWay);
    assert_eq!(controller.displayed(), SplitConfiguration::ThreeWay);
    assert_invariants(&controller);
}

#[test]
fn test_persistent_pane_failure_keeps_degraded_panes() {
    let mut controller = controller();
    let three = vec![
        Vec2::new(0.0, 3000.0),
        Vec2::new(3000.0, 0.0),
        Vec2::new(3000.0, 3000.0),
    ];

    for _ in 0..120 {
        controller.pool_mut().host_mut().fail_next_creations(1);
        controller.tick(&three, DT);
    }

    assert_eq!(controller.current(), SplitConfiguration::ThreeWay);
    assert_eq!(controller.displayed(), SplitConfiguration::Horizontal);
    assert_eq!(controller.pool().host().created_count(), 2);
    assert_invariants(&controller);

    // The surviving panes follow their players instead of being reset
    let pool = controller.pool();
    for pane in pool.panes() {
        let position = pool.host().position(pane.surface).unwrap();
        assert!(position.truncate().distance(three[pane.player]) < 1.0);
    }
}

#[test]
fn test_catastrophic_failure_recovers() {
    let mut host = HeadlessHost::new();
    host.set_fail_creations(true);
    let mut controller = controller_with(host, SplitScreenConfig::default());

    assert_eq!(controller.tick(&pair(5000.0), DT), TickOutcome::Recovered);
    assert_eq!(controller.current(), SplitConfiguration::Single);

    controller.pool_mut().host_mut().set_fail_creations(false);
    assert_eq!(
        controller.tick(&pair(5000.0), DT),
        TickOutcome::Changed {
            from: SplitConfiguration::Single,
            to: SplitConfiguration::Horizontal,
        }
    );
    assert!(controller.pool().owns_primary());
    assert_invariants(&controller);
}

#[test]
fn test_lost_primary_rebuilds_split() {
    let mut controller = controller();
    controller.tick(&pair(5000.0), DT);
    let old_panes: Vec<_> = controller.pool().panes().iter().map(|p| p.surface).collect();

    let main = controller.pool().primary().unwrap();
    controller.pool_mut().host_mut().kill(main);

    assert_eq!(
        controller.tick(&pair(5000.0), DT),
        TickOutcome::Unchanged(SplitConfiguration::Horizontal)
    );
    assert_ne!(controller.pool().primary(), Some(main));
    for surface in old_panes {
        assert!(!controller.pool().host().is_alive(surface));
    }
    assert_invariants(&controller);
}

// ============================================================================
// Shutdown Tests
// ============================================================================

#[test]
fn test_shutdown_restores_host_surface() {
    let mut controller = controller();
    controller.tick(&pair(5000.0), DT);

    controller.shutdown();
    assert_eq!(controller.current(), SplitConfiguration::Single);
    assert_eq!(controller.readiness(), Readiness::NotReady);

    let host = controller.into_host();
    let main = host.main().unwrap();
    assert!(host.is_enabled(main));
    assert_eq!(host.rect(main), Some(ViewportRect::FULLSCREEN));
    assert_eq!(host.live_count(), 1);
}
