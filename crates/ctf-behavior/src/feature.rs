//! The fixed feature vocabulary and a heap-free feature vector.

use std::fmt;

/// Every situational signal any mode can compute.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Feature {
    SuccessorScore,
    DistanceToFood,
    DistanceToEnemy,
    DistanceToMiddle,
    ChoicesAvailable,
    NumInvaders,
    InvaderDistance,
    Stop,
    Reverse,
}

impl Feature {
    pub const COUNT: usize = 9;

    pub const ALL: [Feature; Feature::COUNT] = [
        Feature::SuccessorScore,
        Feature::DistanceToFood,
        Feature::DistanceToEnemy,
        Feature::DistanceToMiddle,
        Feature::ChoicesAvailable,
        Feature::NumInvaders,
        Feature::InvaderDistance,
        Feature::Stop,
        Feature::Reverse,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Wire name, as written to decision traces.
    pub fn name(self) -> &'static str {
        match self {
            Feature::SuccessorScore   => "successorScore",
            Feature::DistanceToFood   => "distanceToFood",
            Feature::DistanceToEnemy  => "distanceToEnemy",
            Feature::DistanceToMiddle => "distanceToMiddle",
            Feature::ChoicesAvailable => "choicesAvailable",
            Feature::NumInvaders      => "numInvaders",
            Feature::InvaderDistance  => "invaderDistance",
            Feature::Stop             => "stop",
            Feature::Reverse          => "reverse",
        }
    }

    pub fn from_name(name: &str) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Feature values for one (agent, candidate move) pair.
///
/// Unset keys are absent, not zero; the evaluator skips them.  Built fresh
/// per candidate and never mutated once scored.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct FeatureVector {
    values: [Option<f64>; Feature::COUNT],
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    #[inline]
    pub fn with(mut self, feature: Feature, value: f64) -> Self {
        self.values[feature.index()] = Some(value);
        self
    }

    #[inline]
    pub fn get(&self, feature: Feature) -> Option<f64> {
        self.values[feature.index()]
    }

    #[inline]
    pub fn contains(&self, feature: Feature) -> bool {
        self.values[feature.index()].is_some()
    }

    /// Populated `(feature, value)` pairs in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL
            .iter()
            .filter_map(|&f| self.values[f.index()].map(|v| (f, v)))
    }

    pub fn len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (feature, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{feature}: {value}")?;
        }
        f.write_str("}")
    }
}
