//! `ctf-core`: foundational types for the capture-the-flag reflex engine.
//!
//! Grid geometry, team sides, agent ids, and seeded randomness shared by the
//! decision engine and any host that runs it.
//!
//! # What lives here
//!
//! | Module     | Contents                                              |
//! |------------|-------------------------------------------------------|
//! | [`ids`]    | `AgentId`                                             |
//! | [`grid`]   | `Cell`, `Direction`                                   |
//! | [`team`]   | `Team`, home-side geometry                            |
//! | [`time`]   | `Turn`                                                |
//! | [`rng`]    | `AgentRng` (per-agent), `MatchRng` (global)           |
//! | [`error`]  | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod grid;
pub mod ids;
pub mod rng;
pub mod team;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use grid::{Cell, Direction};
pub use ids::AgentId;
pub use rng::{AgentRng, MatchRng};
pub use team::Team;
pub use time::Turn;
