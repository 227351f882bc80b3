//! Per-frame snapshot of player positions

use glam::Vec2;
use smallvec::SmallVec;

use crate::host::{MAX_PLAYERS, PlayerRoster};
use crate::layout::DistanceSource;

/// Inline storage for one position per tracked player
pub type TrackedPositions = SmallVec<[Vec2; MAX_PLAYERS]>;

/// Snapshot of player world positions, rebuilt once per tick.
///
/// Only the first [`MAX_PLAYERS`] players of the roster are tracked. A player
/// without a position is tracked at the origin.
#[derive(Debug, Clone, Default)]
pub struct PositionTracker {
    positions: TrackedPositions,
}

impl PositionTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the tracked set with the roster's current positions
    pub fn update<R: PlayerRoster + ?Sized>(&mut self, roster: &R) {
        self.positions.clear();
        let count = roster.player_count().min(MAX_PLAYERS);
        self.positions
            .extend((0..count).map(|i| roster.player_position(i).unwrap_or(Vec2::ZERO)));
    }

    /// Tracked position of player `index`, or the origin if it is not tracked
    #[inline]
    pub fn position_of(&self, index: usize) -> Vec2 {
        self.positions.get(index).copied().unwrap_or(Vec2::ZERO)
    }

    /// All tracked positions in player order
    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    /// Number of tracked players
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no player is tracked
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn pairs(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .flat_map(move |(i, &a)| self.positions[i + 1..].iter().map(move |&b| (a, b)))
    }
}

impl DistanceSource for PositionTracker {
    fn far_apart(&self, threshold: f32) -> bool {
        self.pairs().any(|(a, b)| a.distance(b) > threshold)
    }

    fn wider_horizontally(&self) -> bool {
        let (max_h, max_v) = self.pairs().fold((0.0f32, 0.0f32), |(h, v), (a, b)| {
            let d = (a - b).abs();
            (h.max(d.x), v.max(d.y))
        });
        max_h > max_v
    }
}
