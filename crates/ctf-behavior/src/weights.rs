//! Per-mode weight tables.
//!
//! One constant table per [`BehaviorMode`], indexed by [`Feature`].  Keys a
//! table does not mention weigh zero.

use crate::{BehaviorMode, Feature, FeatureVector};

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct WeightTable {
    weights: [f64; Feature::COUNT],
}

impl WeightTable {
    /// Build a table from `(feature, weight)` pairs; unnamed keys are zero.
    pub const fn from_pairs<const N: usize>(pairs: [(Feature, f64); N]) -> Self {
        let mut weights = [0.0; Feature::COUNT];
        let mut i = 0;
        while i < N {
            weights[pairs[i].0 as usize] = pairs[i].1;
            i += 1;
        }
        Self { weights }
    }

    #[inline]
    pub fn weight(&self, feature: Feature) -> f64 {
        self.weights[feature.index()]
    }

    /// Dot product with `features`, skipping absent keys.
    pub fn dot(&self, features: &FeatureVector) -> f64 {
        features.iter().map(|(f, v)| v * self.weight(f)).sum()
    }

    pub fn for_mode(mode: BehaviorMode) -> &'static WeightTable {
        match mode {
            BehaviorMode::Safe | BehaviorMode::SuperSafe { .. } => &SAFE,
            BehaviorMode::Cautious  => &CAUTIOUS,
            BehaviorMode::Running   => &RUNNING,
            BehaviorMode::Evading   => &EVADING,
            BehaviorMode::Pursuing  => &PURSUING,
            BehaviorMode::Returning => &RETURNING,
            BehaviorMode::Scared    => &SCARED,
        }
    }
}

// ── Tables ────────────────────────────────────────────────────────────────────

const SAFE: WeightTable = WeightTable::from_pairs([
    (Feature::SuccessorScore, 100.0),
    (Feature::DistanceToFood, -1.0),
    (Feature::DistanceToEnemy, 1.0),
]);

const CAUTIOUS: WeightTable = WeightTable::from_pairs([
    (Feature::SuccessorScore, 100.0),
    (Feature::DistanceToFood, -1.0),
    (Feature::DistanceToEnemy, 20.0),
    (Feature::ChoicesAvailable, 10.0),
]);

const RUNNING: WeightTable = WeightTable::from_pairs([
    (Feature::SuccessorScore, 50.0),
    (Feature::DistanceToFood, -1.0),
    (Feature::ChoicesAvailable, 60.0),
    (Feature::DistanceToEnemy, 60.0),
]);

const EVADING: WeightTable = WeightTable::from_pairs([
    (Feature::SuccessorScore, 50.0),
    (Feature::ChoicesAvailable, 70.0),
    (Feature::DistanceToEnemy, 70.0),
]);

const PURSUING: WeightTable = WeightTable::from_pairs([
    (Feature::NumInvaders, -1000.0),
    (Feature::InvaderDistance, -10.0),
    (Feature::Reverse, -2.0),
]);

const RETURNING: WeightTable = WeightTable::from_pairs([(Feature::DistanceToMiddle, -10.0)]);

const SCARED: WeightTable = WeightTable::from_pairs([
    (Feature::InvaderDistance, 10.0),
    (Feature::Reverse, -2.0),
]);
