//! `ctf-arena`: reference host engine for capture-the-flag reflex agents.
//!
//! The arena owns the maze, the rules, and the turn loop.  Agents see it only
//! through the `ctf_behavior` host traits, which [`ArenaState`] implements.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`layout`]     | `Layout`: text maze parser                                |
//! | [`distance`]   | `DistanceTable`: all-pairs BFS maze distances             |
//! | [`state`]      | `ArenaState` (`GameView`), `ArenaEvent`, capture rules    |
//! | [`config`]     | `MatchConfig`                                             |
//! | [`controller`] | `Controller` seats, `Wanderer`                            |
//! | [`runner`]     | `Match`, `MatchBuilder`, `TurnSummary`, `MatchOutcome`    |
//! | [`observer`]   | `MatchObserver`, `NoopObserver`                           |
//! | [`trace`]      | `CsvTraceWriter`                                          |
//! | [`series`]     | `run_series`, `seed_series`, `SeriesSummary`              |
//! | [`error`]      | `ArenaError`, `ArenaResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | `run_series` plays matches on Rayon's thread pool.        |

pub mod config;
pub mod controller;
pub mod distance;
pub mod error;
pub mod layout;
pub mod observer;
pub mod runner;
pub mod series;
pub mod state;
pub mod trace;


pub use config::MatchConfig;
pub use controller::{Action, Controller, Wanderer};
pub use distance::DistanceTable;
pub use error::{ArenaError, ArenaResult};
pub use layout::Layout;
pub use observer::{MatchObserver, NoopObserver};
pub use runner::{Match, MatchBuilder, MatchOutcome, TurnSummary, team_ids};
pub use series::{SeriesSummary, run_series, seed_series};
pub use state::{AgentState, ArenaEvent, ArenaState};
pub use trace::CsvTraceWriter;
