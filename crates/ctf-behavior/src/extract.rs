//! Per-mode feature functions.
//!
//! Every function reads the post-move snapshot (`after`).  Threat distance
//! also reads the pre-move threats, and defense the pre-move heading to
//! penalise reversals.  None of them touch the mode.

use ctf_core::{Cell, Direction};

use crate::{
    BehaviorMode, DistanceOracle, Feature, FeatureVector, SituationSnapshot, Tuning,
    UNSEEN_THREAT_DISTANCE,
};

pub struct FeatureExtractor<'a, O: DistanceOracle + ?Sized> {
    oracle:       &'a O,
    tuning:       &'a Tuning,
    patrol_point: Cell,
}

impl<'a, O: DistanceOracle + ?Sized> FeatureExtractor<'a, O> {
    pub fn new(oracle: &'a O, tuning: &'a Tuning, patrol_point: Cell) -> Self {
        Self { oracle, tuning, patrol_point }
    }

    /// Features of taking `mv` under `mode`.
    ///
    /// `SuperSafe` is resolved through [`BehaviorMode::delegate`] using the
    /// pre-move capsule count, so all candidates of one turn share a
    /// feature set.
    pub fn extract(
        &self,
        mode:   BehaviorMode,
        before: &SituationSnapshot,
        after:  &SituationSnapshot,
        mv:     Direction,
    ) -> FeatureVector {
        match mode.delegate(before.enemy_capsules.len(), &self.tuning.offense) {
            BehaviorMode::Safe | BehaviorMode::SuperSafe { .. } => self.collect_freely(after),
            BehaviorMode::Cautious  => self.collect_cautiously(before, after, mv),
            BehaviorMode::Running   => self.retreat(before, after, mv),
            BehaviorMode::Evading   => self.rush_capsule(before, after, mv),
            BehaviorMode::Pursuing  => self.pursue(before, after, mv),
            BehaviorMode::Returning => self.patrol(after),
            BehaviorMode::Scared    => self.keep_away(before, after, mv),
        }
    }

    // ── Offense ───────────────────────────────────────────────────────────

    fn collect_freely(&self, after: &SituationSnapshot) -> FeatureVector {
        FeatureVector::new()
            .with(Feature::DistanceToFood, self.food_distance(after))
            .with(Feature::SuccessorScore, -(after.food_left() as f64))
            .with(Feature::DistanceToEnemy, 0.0)
    }

    fn collect_cautiously(
        &self,
        before: &SituationSnapshot,
        after:  &SituationSnapshot,
        mv:     Direction,
    ) -> FeatureVector {
        let threat = self.threat_distance(before, after, mv) as f64;
        FeatureVector::new()
            .with(Feature::DistanceToFood, self.food_distance(after))
            .with(Feature::DistanceToEnemy, threat * self.tuning.offense.caution_multiplier)
            .with(Feature::ChoicesAvailable, after.legal_move_count as f64)
    }

    fn retreat(
        &self,
        before: &SituationSnapshot,
        after:  &SituationSnapshot,
        mv:     Direction,
    ) -> FeatureVector {
        let target_x = self.retreat_x(after);
        FeatureVector::new()
            .with(Feature::SuccessorScore, -((after.position.x - target_x).abs() as f64))
            .with(Feature::DistanceToEnemy, self.threat_distance(before, after, mv) as f64)
            .with(Feature::ChoicesAvailable, after.legal_move_count as f64)
    }

    fn rush_capsule(
        &self,
        before: &SituationSnapshot,
        after:  &SituationSnapshot,
        mv:     Direction,
    ) -> FeatureVector {
        // A capsule eaten by this very move leaves none to measure: best case.
        let capsule = after.nearest_enemy_capsule(self.oracle).unwrap_or(0);
        FeatureVector::new()
            .with(Feature::SuccessorScore, -(capsule as f64))
            .with(Feature::DistanceToEnemy, self.threat_distance(before, after, mv) as f64)
            .with(Feature::ChoicesAvailable, after.legal_move_count as f64)
    }

    /// Distance from the projected cell to the nearest threat seen before or
    /// after the move.
    ///
    /// A host that resolves the move as a capture puts the agent back on its
    /// start cell, usually out of sight of the ghost that caught it.  Such a
    /// projection does not land on `position.step(mv)` and measures 0.
    fn threat_distance(
        &self,
        before: &SituationSnapshot,
        after:  &SituationSnapshot,
        mv:     Direction,
    ) -> u32 {
        if after.position != before.position.step(mv) {
            return 0;
        }
        before
            .threats()
            .chain(after.threats())
            .map(|p| self.oracle.distance(after.position, p))
            .min()
            .unwrap_or(UNSEEN_THREAT_DISTANCE)
    }

    fn food_distance(&self, after: &SituationSnapshot) -> f64 {
        after.nearest_food(self.oracle).unwrap_or(0) as f64
    }

    /// Column `retreat_depth` steps behind the home line, kept on the board.
    pub fn retreat_x(&self, snapshot: &SituationSnapshot) -> i32 {
        let depth = self.tuning.offense.retreat_depth;
        (snapshot.home_line_x + snapshot.team.toward_home() * depth).clamp(0, snapshot.width - 1)
    }

    // ── Defense ───────────────────────────────────────────────────────────

    fn pursue(
        &self,
        before: &SituationSnapshot,
        after:  &SituationSnapshot,
        mv:     Direction,
    ) -> FeatureVector {
        FeatureVector::new()
            .with(Feature::NumInvaders, after.invader_count() as f64)
            .with(Feature::InvaderDistance, after.invader_distance(self.oracle) as f64)
            .with(Feature::Reverse, reverse_indicator(before, mv))
    }

    fn patrol(&self, after: &SituationSnapshot) -> FeatureVector {
        let d = self.oracle.distance(after.position, self.patrol_point);
        FeatureVector::new().with(Feature::DistanceToMiddle, d as f64)
    }

    fn keep_away(
        &self,
        before: &SituationSnapshot,
        after:  &SituationSnapshot,
        mv:     Direction,
    ) -> FeatureVector {
        FeatureVector::new()
            .with(Feature::InvaderDistance, after.invader_distance(self.oracle) as f64)
            .with(Feature::Reverse, reverse_indicator(before, mv))
    }
}

/// `+1` for turning straight back, `-1` otherwise.
fn reverse_indicator(before: &SituationSnapshot, mv: Direction) -> f64 {
    if mv != Direction::Stop && mv == before.heading.reverse() { 1.0 } else { -1.0 }
}
