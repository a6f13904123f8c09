//! Team membership and home-side geometry.
//!
//! The board is split vertically at `width / 2`.  Red owns the western half
//! (`x < width / 2`), Blue the eastern half.  Agents are collectors while on
//! the opponent's half and defenders on their own.

use std::fmt;
use std::str::FromStr;

use crate::{AgentId, Cell, CoreError};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    /// Even agent indices play for Red, odd ones for Blue.
    #[inline]
    pub fn for_agent(agent: AgentId) -> Team {
        if agent.0 % 2 == 0 { Team::Red } else { Team::Blue }
    }

    #[inline]
    pub fn opponent(self) -> Team {
        match self {
            Team::Red  => Team::Blue,
            Team::Blue => Team::Red,
        }
    }

    /// `true` if `cell` lies on this team's half of a board `width` wide.
    #[inline]
    pub fn is_home(self, cell: Cell, width: i32) -> bool {
        match self {
            Team::Red  => cell.x < width / 2,
            Team::Blue => cell.x >= width / 2,
        }
    }

    /// The boundary column on this team's own side.
    #[inline]
    pub fn home_line_x(self, width: i32) -> i32 {
        match self {
            Team::Red  => width / 2 - 1,
            Team::Blue => width / 2,
        }
    }

    /// Sign of an x step that moves deeper into home territory.
    #[inline]
    pub fn toward_home(self) -> i32 {
        match self {
            Team::Red  => -1,
            Team::Blue => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Team::Red  => "red",
            Team::Blue => "blue",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Team {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red"  => Ok(Team::Red),
            "blue" => Ok(Team::Blue),
            _ => Err(CoreError::Parse { what: "team", input: s.to_owned() }),
        }
    }
}
