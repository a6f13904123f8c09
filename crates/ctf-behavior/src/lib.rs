//! `ctf-behavior`: per-turn decision engine for capture-the-flag agents.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`host`]     | `GameView`, `DistanceOracle`, `OpponentView`: engine seam      |
//! | [`snapshot`] | `SituationSnapshot`: per-turn read-only view of one agent      |
//! | [`mode`]     | `AgentRole`, `BehaviorMode`                                    |
//! | [`feature`]  | `Feature` vocabulary, `FeatureVector`                          |
//! | [`weights`]  | `WeightTable`: one constant table per mode                     |
//! | [`tuning`]   | `Tuning`, `OffenseTuning`, `DefenseTuning`                     |
//! | [`machine`]  | `ModeMachine`: pure per-turn mode transitions                  |
//! | [`extract`]  | `FeatureExtractor`: per-mode feature functions                 |
//! | [`evaluate`] | Linear scoring and first-maximum selection                     |
//! | [`agent`]    | `ReflexAgent`, `Decision`                                      |
//! | [`registry`] | Static role-tag → constructor table, `create_team`             |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                           |
//!
//! # Turn pipeline
//!
//! ```text
//! chooseAction(view):
//!   ① observe     SituationSnapshot of the pre-move state
//!   ② advance     ModeMachine::advance → next mode (not yet committed)
//!   ③ extract     for every legal move except Stop, project the successor
//!                 and compute the mode's FeatureVector
//!   ④ evaluate    dot product with the mode's WeightTable
//!   ⑤ select      first maximum, or nearest-to-start in the end game
//!   ⑥ commit      store the advanced ModeMachine exactly once
//! ```
//!
//! Nothing here draws randomness: identical inputs always produce the same
//! move.

pub mod agent;
pub mod error;
pub mod evaluate;
pub mod extract;
pub mod feature;
pub mod host;
pub mod machine;
pub mod mode;
pub mod registry;
pub mod snapshot;
pub mod tuning;
pub mod weights;

#[cfg(test)]
mod tests;

pub use agent::{Decision, MoveScore, ReflexAgent};
pub use error::{BehaviorError, BehaviorResult};
pub use evaluate::{evaluate, select_best};
pub use extract::FeatureExtractor;
pub use feature::{Feature, FeatureVector};
pub use host::{DistanceOracle, GameView, OpponentView};
pub use machine::ModeMachine;
pub use mode::{AgentRole, BehaviorMode};
pub use registry::{create_team, registered_tags, spawn};
pub use snapshot::{NO_INVADER_DISTANCE, SituationSnapshot, UNSEEN_THREAT_DISTANCE};
pub use tuning::{DefenseTuning, OffenseTuning, Tuning};
pub use weights::WeightTable;
