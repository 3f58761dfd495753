//! Tiling layout of panes.
//!
//! Panes are leaves of a full binary split tree. The tree is kept as a flat
//! preorder sequence ([`LayoutTree`]): a split is immediately followed by
//! its first subtree, then its second. Parent and sibling lookups go through
//! a [`Link`] table rebuilt from that sequence, never through backward
//! scanning.
//!
//! ```text
//! 0 Split(Vertical)
//! 1 ├── Pane a          ← left
//! 2 └── Split(Horizontal)
//! 3     ├── Pane b      ← top right
//! 4     └── Pane c      ← bottom right
//! ```

mod tree;

pub use tree::{CloseOutcome, LayoutTree, Link, Node};

/// How a split divides its rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// First child on top, second below.
    Horizontal,
    /// First child on the left, second on the right.
    Vertical,
}

impl Orientation {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Horizontal => "Hsplit",
            Self::Vertical => "Vsplit",
        }
    }
}

/// Focus movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The split orientation whose children lie along this direction.
    pub const fn axis(self) -> Orientation {
        match self {
            Self::Up | Self::Down => Orientation::Horizontal,
            Self::Left | Self::Right => Orientation::Vertical,
        }
    }

    /// Whether moving this way goes from a first child to a second child.
    pub const fn is_forward(self) -> bool {
        matches!(self, Self::Down | Self::Right)
    }
}
