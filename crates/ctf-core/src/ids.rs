//! Agent identifiers.
//!
//! The engine numbers its agents `0..4` and hands the number to every seat.
//! Parity encodes the team, so the id alone is enough to find an agent's
//! side, its slot in per-agent arrays, and its place in the turn order.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) as $label:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Placeholder for a seat that has not been assigned yet.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Slot in a per-agent array.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, " {}"), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;

            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Engine-assigned agent index.  Even indices play for Red, odd for Blue.
    pub struct AgentId(u32) as "agent";
}
