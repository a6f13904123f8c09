//! Static role registry.
//!
//! Team setup resolves role tags through a fixed table of constructors, so
//! the set of playable agents is known at compile time.  The legacy agent
//! class names are accepted as aliases.

use ctf_core::AgentId;

use crate::{AgentRole, BehaviorError, BehaviorResult, ReflexAgent, Tuning};

type Constructor = fn(AgentId, Tuning) -> ReflexAgent;

const REGISTRY: &[(&str, Constructor)] = &[
    ("offense", offensive),
    ("defense", defensive),
    ("OffensiveReflexAgent", offensive),
    ("DefensiveReflexAgent", defensive),
];

fn offensive(id: AgentId, tuning: Tuning) -> ReflexAgent {
    ReflexAgent::new(id, AgentRole::Offense, tuning)
}

fn defensive(id: AgentId, tuning: Tuning) -> ReflexAgent {
    ReflexAgent::new(id, AgentRole::Defense, tuning)
}

/// Every accepted tag, canonical names first.
pub fn registered_tags() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|(tag, _)| *tag)
}

/// Build one agent from its role tag (case-insensitive).
pub fn spawn(tag: &str, id: AgentId, tuning: Tuning) -> BehaviorResult<ReflexAgent> {
    REGISTRY
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(tag))
        .map(|(_, build)| build(id, tuning))
        .ok_or_else(|| BehaviorError::UnknownRole(tag.to_owned()))
}

/// Build a two-agent team.  `tuning` is validated once and shared.
pub fn create_team(
    first:      AgentId,
    second:     AgentId,
    first_tag:  &str,
    second_tag: &str,
    tuning:     &Tuning,
) -> BehaviorResult<[ReflexAgent; 2]> {
    tuning.validate()?;
    Ok([
        spawn(first_tag, first, tuning.clone())?,
        spawn(second_tag, second, tuning.clone())?,
    ])
}
