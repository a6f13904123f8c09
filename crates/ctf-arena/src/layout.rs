//! Text maze layouts.
//!
//! # Format
//!
//! One line per board row, top row first.  Every row must have the same
//! width.
//!
//! | Char      | Meaning                                  |
//! |-----------|------------------------------------------|
//! | `%`       | Wall                                     |
//! | `.`       | Food                                     |
//! | `o`       | Power capsule                            |
//! | `1`–`4`   | Start cell of agent 0–3                  |
//! | space     | Open floor                               |
//!
//! Red (agents 0 and 2) owns the western half.  Food and capsules belong to
//! whichever half they lie on.
//!
//! ```text
//! %%%%%%%%%%
//! %1 .  o 2%
//! %3 o  . 4%
//! %%%%%%%%%%
//! ```

use std::path::Path;

use ctf_core::{AgentId, Cell, Team};

use crate::{ArenaError, ArenaResult};

pub const AGENT_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    width:    i32,
    height:   i32,
    /// Row-major, indexed by [`Layout::index`].
    walls:    Vec<bool>,
    food:     Vec<Cell>,
    capsules: Vec<Cell>,
    starts:   [Cell; AGENT_COUNT],
}

impl Layout {
    pub fn from_path(path: &Path) -> ArenaResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> ArenaResult<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(ArenaError::Layout { line: 0, message: "layout is empty".into() });
        };

        let width = first.chars().count();
        let height = rows.len();
        if width < 2 {
            return Err(ArenaError::Layout { line: 1, message: "board narrower than 2".into() });
        }

        let mut walls = vec![false; width * height];
        let mut food = Vec::new();
        let mut capsules = Vec::new();
        let mut starts: [Option<Cell>; AGENT_COUNT] = [None; AGENT_COUNT];

        for (row, text) in rows.iter().enumerate() {
            let line = row + 1;
            if text.chars().count() != width {
                return Err(ArenaError::Layout {
                    line,
                    message: format!("expected {width} columns, found {}", text.chars().count()),
                });
            }
            let y = (height - 1 - row) as i32;
            for (x, ch) in text.chars().enumerate() {
                let cell = Cell::new(x as i32, y);
                match ch {
                    '%' => walls[row * width + x] = true,
                    '.' => food.push(cell),
                    'o' => capsules.push(cell),
                    ' ' => {}
                    '1'..='4' => {
                        let slot = ch as usize - '1' as usize;
                        if starts[slot].replace(cell).is_some() {
                            return Err(ArenaError::Layout {
                                line,
                                message: format!("start {ch} appears twice"),
                            });
                        }
                    }
                    other => {
                        return Err(ArenaError::Layout {
                            line,
                            message: format!("unexpected character {other:?}"),
                        });
                    }
                }
            }
        }

        let mut resolved = [Cell::default(); AGENT_COUNT];
        for (slot, start) in starts.iter().enumerate() {
            resolved[slot] = start.ok_or_else(|| ArenaError::Layout {
                line:    0,
                message: format!("missing start {}", slot + 1),
            })?;
        }

        food.sort();
        capsules.sort();
        Ok(Self {
            width: width as i32,
            height: height as i32,
            walls,
            food,
            capsules,
            starts: resolved,
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// Row-major slot of `cell`; `None` off the board.
    #[inline]
    pub fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell).then(|| {
            let row = (self.height - 1 - cell.y) as usize;
            row * self.width as usize + cell.x as usize
        })
    }

    /// Off-board cells count as walls.
    #[inline]
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.index(cell).is_none_or(|i| self.walls[i])
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height)
            .rev()
            .flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
            .filter(|&c| !self.is_wall(c))
    }

    pub fn food(&self) -> &[Cell] {
        &self.food
    }

    /// Food initially lying on `team`'s half.
    pub fn food_on(&self, team: Team) -> usize {
        self.food.iter().filter(|&&c| team.is_home(c, self.width)).count()
    }

    pub fn capsules(&self) -> &[Cell] {
        &self.capsules
    }

    pub fn start(&self, agent: AgentId) -> Cell {
        self.starts[agent.index() % AGENT_COUNT]
    }
}
