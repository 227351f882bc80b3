//! Split/merge decision with hysteresis

use crate::config::SplitScreenConfig;
use crate::host::MAX_PLAYERS;

use super::{LayoutPreference, SplitConfiguration};

/// Pairwise distance queries the policy needs about the tracked players
pub trait DistanceSource {
    /// True if any pair of players is strictly farther apart than `threshold`
    fn far_apart(&self, threshold: f32) -> bool;

    /// True if the players are spread more horizontally than vertically
    fn wider_horizontally(&self) -> bool;
}

/// Chooses the split configuration for the current frame.
///
/// Entering a split requires the players to exceed `split_threshold`; once
/// split, the display only merges again when they come closer than
/// `merge_threshold`. `split_threshold` is expected to be larger than
/// `merge_threshold`, otherwise the band inverts. That is a configuration
/// contract and is not corrected here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPolicy {
    /// Layout requested by the user
    pub preference: LayoutPreference,
    /// Skip the distance checks and always split
    pub force_split: bool,
    /// Distance above which a single view splits
    pub split_threshold: f32,
    /// Distance below which a split view merges
    pub merge_threshold: f32,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self::from_config(&SplitScreenConfig::default())
    }
}

impl LayoutPolicy {
    /// Build the policy from the loaded configuration
    pub fn from_config(config: &SplitScreenConfig) -> Self {
        Self {
            preference: config.default_layout,
            force_split: config.force_always_split,
            split_threshold: config.split_threshold,
            merge_threshold: config.merge_threshold,
        }
    }

    /// Target configuration for `player_count` players.
    ///
    /// `current` is the configuration in effect before this call and only
    /// matters for the hysteresis re-check.
    pub fn decide(
        &self,
        player_count: usize,
        current: SplitConfiguration,
        source: &impl DistanceSource,
    ) -> SplitConfiguration {
        let player_count = player_count.clamp(1, MAX_PLAYERS);

        if !self.force_split && player_count == 1 {
            return SplitConfiguration::Single;
        }

        let far_apart = self.force_split
            || source.far_apart(self.split_threshold)
            || (current.is_split() && source.far_apart(self.merge_threshold));

        if !far_apart {
            return SplitConfiguration::Single;
        }

        match self.preference {
            LayoutPreference::Automatic => match player_count {
                1 | 2 => {
                    if source.wider_horizontally() {
                        SplitConfiguration::Vertical
                    } else {
                        SplitConfiguration::Horizontal
                    }
                }
                3 => SplitConfiguration::ThreeWay,
                _ => SplitConfiguration::FourWay,
            },
            preference => map_preference(preference, player_count),
        }
    }
}

/// Clamp an explicit layout preference to what the player count supports
fn map_preference(preference: LayoutPreference, player_count: usize) -> SplitConfiguration {
    match preference {
        LayoutPreference::Horizontal => SplitConfiguration::Horizontal,
        LayoutPreference::Vertical => SplitConfiguration::Vertical,
        LayoutPreference::ThreeWay if player_count >= 3 => SplitConfiguration::ThreeWay,
        LayoutPreference::FourWay if player_count == 4 => SplitConfiguration::FourWay,
        LayoutPreference::FourWay if player_count == 3 => SplitConfiguration::ThreeWay,
        LayoutPreference::ThreeWay | LayoutPreference::FourWay => SplitConfiguration::Horizontal,
        LayoutPreference::Automatic => SplitConfiguration::Single,
    }
}
