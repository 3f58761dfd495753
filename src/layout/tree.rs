use ratatui::layout::Rect;

use crate::pane::PaneView;

use super::{Direction, Orientation};

/// One entry of the preorder sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Split(Orientation),
    Pane(PaneView),
}

impl Node {
    pub const fn is_split(&self) -> bool {
        matches!(self, Self::Split(_))
    }

    pub const fn as_pane(&self) -> Option<&PaneView> {
        match self {
            Self::Pane(view) => Some(view),
            Self::Split(_) => None,
        }
    }

    pub const fn as_pane_mut(&mut self) -> Option<&mut PaneView> {
        match self {
            Self::Pane(view) => Some(view),
            Self::Split(_) => None,
        }
    }
}

/// Structural neighbours of a node, derived from the preorder sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Link {
    /// Enclosing split; `None` for the root.
    pub parent: Option<usize>,
    /// First and second child roots; `None` for panes.
    pub children: Option<(usize, usize)>,
}

/// Result of [`LayoutTree::close`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The subtree was removed and its sibling promoted.
    Closed,
    /// Nothing would be left to show; the tree is untouched.
    LastPane,
}

/// Full binary split tree stored as a flat preorder sequence.
///
/// The sequence is never empty and `focus` always names a pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutTree {
    nodes: Vec<Node>,
    focus: usize,
}

impl LayoutTree {
    /// A tree holding a single pane.
    pub fn new(view: PaneView) -> Self {
        Self {
            nodes: vec![Node::Pane(view)],
            focus: 0,
        }
    }

    /// Build a tree from a preorder sequence. Focus lands on the first pane.
    ///
    /// # Panics
    ///
    /// Panics if `nodes` is not a full binary tree.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        let mut tree = Self { nodes, focus: 0 };
        tree.fix_focus();
        tree.check_invariants();
        tree
    }

    /// Startup layout for several buffers.
    ///
    /// Pane `k` shows buffer `k`. Each split holds one pane on its near side
    /// and the rest of the chain on the far side, alternating vertical and
    /// horizontal so the panes spiral inward.
    pub fn tiled(buffer_count: usize, columns: u16) -> Self {
        if buffer_count <= 1 {
            return Self::new(PaneView::new(0, columns));
        }
        let mut nodes = Vec::with_capacity(buffer_count * 2 - 1);
        for k in 0..buffer_count - 1 {
            let orientation = if k % 2 == 0 {
                Orientation::Vertical
            } else {
                Orientation::Horizontal
            };
            nodes.push(Node::Split(orientation));
            nodes.push(Node::Pane(PaneView::new(k, columns)));
        }
        nodes.push(Node::Pane(PaneView::new(buffer_count - 1, columns)));
        Self::from_nodes(nodes)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Index of the focused pane.
    pub const fn focus(&self) -> usize {
        self.focus
    }

    pub fn view(&self, i: usize) -> Option<&PaneView> {
        self.nodes.get(i).and_then(Node::as_pane)
    }

    pub fn view_mut(&mut self, i: usize) -> Option<&mut PaneView> {
        self.nodes.get_mut(i).and_then(Node::as_pane_mut)
    }

    pub fn focused_view(&self) -> &PaneView {
        match &self.nodes[self.focus] {
            Node::Pane(view) => view,
            Node::Split(_) => unreachable!("focus on split {}", self.focus),
        }
    }

    pub fn focused_view_mut(&mut self) -> &mut PaneView {
        let focus = self.focus;
        match &mut self.nodes[focus] {
            Node::Pane(view) => view,
            Node::Split(_) => unreachable!("focus on split {focus}"),
        }
    }

    /// All pane views, in preorder.
    pub fn views_mut(&mut self) -> impl Iterator<Item = &mut PaneView> {
        self.nodes.iter_mut().filter_map(Node::as_pane_mut)
    }

    /// Number of nodes in the subtree rooted at `i`.
    ///
    /// # Panics
    ///
    /// Panics if the sequence ends before the subtree is complete.
    pub fn subtree_span(&self, i: usize) -> usize {
        // Each split opens two child slots and each node fills one.
        let mut open = 1usize;
        let mut j = i;
        while open > 0 {
            if self.nodes[j].is_split() {
                open += 1;
            } else {
                open -= 1;
            }
            j += 1;
        }
        j - i
    }

    /// Parent/child table for every node, built in one preorder pass.
    pub fn lineage(&self) -> Vec<Link> {
        let mut links = vec![Link::default(); self.nodes.len()];
        // Splits still waiting for their second child, with that flag.
        let mut pending: Vec<(usize, bool)> = Vec::new();
        for (i, node) in self.nodes.iter().enumerate() {
            if let Some((parent, has_first)) = pending.last_mut() {
                let parent = *parent;
                links[i].parent = Some(parent);
                if *has_first {
                    pending.pop();
                    links[parent].children = Some((parent + 1, i));
                } else {
                    *has_first = true;
                }
            }
            if node.is_split() {
                pending.push((i, false));
            }
        }
        assert!(pending.is_empty(), "split with fewer than two children");
        links
    }

    /// The split directly above `i`, or `None` for the root.
    pub fn locate_parent(&self, i: usize) -> Option<usize> {
        self.lineage()[i].parent
    }

    /// Root of the other subtree under `i`'s parent.
    pub fn locate_sibling(&self, i: usize) -> Option<usize> {
        let parent = self.locate_parent(i)?;
        let first = parent + 1;
        if i == first {
            Some(first + self.subtree_span(first))
        } else {
            Some(first)
        }
    }

    /// Replace the node at `i` with a split whose first child is the old
    /// subtree and whose second child is a fresh pane on buffer 0.
    ///
    /// Focus moves to the new pane, whose index is returned.
    pub fn split(&mut self, i: usize, orientation: Orientation, columns: u16) -> usize {
        let span = self.subtree_span(i);
        self.nodes
            .insert(i + span, Node::Pane(PaneView::new(0, columns)));
        self.nodes.insert(i, Node::Split(orientation));
        let created = i + 1 + span;
        self.focus = created;
        tracing::debug!(at = i, ?orientation, created, "split");
        self.check_invariants();
        created
    }

    /// Remove the subtree at `i` and let its sibling take the parent's place.
    ///
    /// Focus stays on the same pane when it survives, otherwise it moves to
    /// the first pane of the promoted sibling.
    pub fn close(&mut self, i: usize) -> CloseOutcome {
        let Some(parent) = self.locate_parent(i) else {
            return CloseOutcome::LastPane;
        };
        let span = self.subtree_span(i);
        let old_focus = self.focus;
        let first_child = i == parent + 1;

        if first_child {
            self.nodes.drain(parent..i + span);
        } else {
            self.nodes.drain(i..i + span);
            self.nodes.remove(parent);
        }

        self.focus = if (i..i + span).contains(&old_focus) {
            parent
        } else if old_focus < parent {
            old_focus
        } else if old_focus >= i + span {
            old_focus - span - 1
        } else {
            // Inside the sibling, which now starts at `parent`.
            old_focus - 1
        };
        self.fix_focus();
        tracing::debug!(at = i, parent, focus = self.focus, "close");
        self.check_invariants();
        CloseOutcome::Closed
    }

    /// Move focus to the neighbouring pane in `direction`.
    ///
    /// Walks up from the focused pane to the nearest split that lies along
    /// the direction with the focus on its near side, then enters the other
    /// child at its first pane. Returns `false` (focus unchanged) when no
    /// such split exists.
    pub fn move_focus(&mut self, direction: Direction) -> bool {
        let links = self.lineage();
        let mut current = self.focus;
        while let Some(parent) = links[current].parent {
            if self.nodes[parent] == Node::Split(direction.axis()) {
                let Some((first, second)) = links[parent].children else {
                    unreachable!("split {parent} without children");
                };
                let target = if direction.is_forward() && current == first {
                    Some(second)
                } else if !direction.is_forward() && current == second {
                    Some(first)
                } else {
                    None
                };
                if let Some(target) = target {
                    self.focus = target;
                    self.fix_focus();
                    return true;
                }
            }
            current = parent;
        }
        false
    }

    /// Descend from the focused node to its first pane.
    pub fn fix_focus(&mut self) {
        while self.nodes[self.focus].is_split() {
            self.focus += 1;
        }
    }

    /// Point focus at node `i`, descending into it if it is a split.
    pub fn focus_node(&mut self, i: usize) {
        assert!(i < self.nodes.len(), "node {i} out of range");
        self.focus = i;
        self.fix_focus();
    }

    /// Flip the split at `i`, or the split holding pane `i`.
    ///
    /// Returns `false` for a lone root pane.
    pub fn toggle_orientation(&mut self, i: usize) -> bool {
        let target = if self.nodes[i].is_split() {
            Some(i)
        } else {
            self.locate_parent(i)
        };
        let Some(target) = target else {
            return false;
        };
        if let Node::Split(orientation) = &mut self.nodes[target] {
            *orientation = orientation.toggled();
        }
        true
    }

    /// Node indices of all panes, in preorder.
    pub fn pane_indices(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| !node.is_split())
            .map(|(i, _)| i)
            .collect()
    }

    /// Preorder position of pane `i` among all panes.
    pub fn pane_ordinal(&self, i: usize) -> Option<usize> {
        if self.nodes.get(i)?.is_split() {
            return None;
        }
        Some(self.nodes[..i].iter().filter(|n| !n.is_split()).count())
    }

    /// Focus the `n`th pane in preorder. Returns `false` if there is none.
    pub fn focus_pane(&mut self, n: usize) -> bool {
        match self.pane_indices().get(n) {
            Some(&i) => {
                self.focus = i;
                true
            }
            None => false,
        }
    }

    /// Depth of every node; the root is at depth 0.
    pub fn depths(&self) -> Vec<usize> {
        let links = self.lineage();
        let mut depths = vec![0usize; self.nodes.len()];
        // Parents always precede their children in preorder.
        for i in 0..self.nodes.len() {
            if let Some(parent) = links[i].parent {
                depths[i] = depths[parent] + 1;
            }
        }
        depths
    }

    /// Screen rectangle of every pane.
    ///
    /// Splits give the first child half the space, rounded down, and the
    /// second child the rest.
    pub fn layout(&self, area: Rect) -> Vec<(usize, Rect)> {
        let mut out = Vec::new();
        self.layout_into(0, area, &mut out);
        out
    }

    fn layout_into(&self, i: usize, area: Rect, out: &mut Vec<(usize, Rect)>) -> usize {
        match self.nodes[i] {
            Node::Pane(_) => {
                out.push((i, area));
                1
            }
            Node::Split(orientation) => {
                let (first, second) = match orientation {
                    Orientation::Vertical => {
                        let left = area.width / 2;
                        (
                            Rect { width: left, ..area },
                            Rect {
                                x: area.x + left,
                                width: area.width - left,
                                ..area
                            },
                        )
                    }
                    Orientation::Horizontal => {
                        let top = area.height / 2;
                        (
                            Rect { height: top, ..area },
                            Rect {
                                y: area.y + top,
                                height: area.height - top,
                                ..area
                            },
                        )
                    }
                };
                let mut consumed = 1;
                consumed += self.layout_into(i + consumed, first, out);
                consumed += self.layout_into(i + consumed, second, out);
                consumed
            }
        }
    }

    /// Assert the full-binary and focus invariants.
    ///
    /// # Panics
    ///
    /// Panics if either invariant is broken.
    pub fn check_invariants(&self) {
        assert!(!self.nodes.is_empty(), "layout tree is empty");
        assert_eq!(
            self.subtree_span(0),
            self.nodes.len(),
            "preorder sequence is not a single full binary tree"
        );
        assert!(
            !self.nodes[self.focus].is_split(),
            "focus {} is on a split",
            self.focus
        );
    }
}
