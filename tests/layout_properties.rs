use hexpane::layout::{CloseOutcome, Direction, LayoutTree, Orientation};
use proptest::prelude::*;
use ratatui::layout::Rect;

#[derive(Debug, Clone)]
enum Op {
    Split(Orientation),
    Close,
    Move(Direction),
    Toggle,
    Goto(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Split(Orientation::Horizontal)),
        Just(Op::Split(Orientation::Vertical)),
        Just(Op::Close),
        Just(Op::Move(Direction::Up)),
        Just(Op::Move(Direction::Down)),
        Just(Op::Move(Direction::Left)),
        Just(Op::Move(Direction::Right)),
        Just(Op::Toggle),
        (0usize..8).prop_map(Op::Goto),
    ]
}

fn apply(tree: &mut LayoutTree, op: &Op) {
    let focus = tree.focus();
    match op {
        Op::Split(orientation) => {
            tree.split(focus, *orientation, 16);
        }
        Op::Close => {
            tree.close(focus);
        }
        Op::Move(direction) => {
            tree.move_focus(*direction);
        }
        Op::Toggle => {
            tree.toggle_orientation(focus);
        }
        Op::Goto(n) => {
            tree.focus_pane(*n);
        }
    }
}

proptest! {
    #[test]
    fn tree_stays_well_formed(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut tree = LayoutTree::tiled(1, 16);
        for op in &ops {
            apply(&mut tree, op);
            prop_assert!(!tree.is_empty());
            prop_assert_eq!(tree.subtree_span(0), tree.len());
            prop_assert!(tree.view(tree.focus()).is_some());
            let splits = tree.nodes().iter().filter(|n| n.is_split()).count();
            prop_assert_eq!(tree.pane_indices().len(), splits + 1);
        }
    }

    #[test]
    fn layout_tiles_the_whole_area(
        ops in prop::collection::vec(op_strategy(), 0..40),
        width in 1u16..300,
        height in 1u16..120,
    ) {
        let mut tree = LayoutTree::tiled(3, 16);
        for op in &ops {
            apply(&mut tree, op);
        }
        let area = Rect::new(0, 0, width, height);
        let rects = tree.layout(area);
        prop_assert_eq!(
            rects.iter().map(|(i, _)| *i).collect::<Vec<_>>(),
            tree.pane_indices()
        );
        let covered: u32 = rects
            .iter()
            .map(|(_, r)| u32::from(r.width) * u32::from(r.height))
            .sum();
        prop_assert_eq!(covered, u32::from(width) * u32::from(height));
        for (_, rect) in &rects {
            prop_assert!(area.contains(rect.as_position()) || rect.area() == 0);
        }
    }

    #[test]
    fn split_then_close_restores_nodes(
        ops in prop::collection::vec(op_strategy(), 0..30),
        vertical in any::<bool>(),
    ) {
        let mut tree = LayoutTree::tiled(2, 16);
        for op in &ops {
            apply(&mut tree, op);
        }
        let before = tree.nodes().to_vec();
        let orientation = if vertical { Orientation::Vertical } else { Orientation::Horizontal };
        let created = tree.split(tree.focus(), orientation, 16);
        prop_assert_eq!(tree.focus(), created);
        prop_assert_eq!(tree.close(created), CloseOutcome::Closed);
        prop_assert_eq!(tree.nodes(), before.as_slice());
    }

    #[test]
    fn move_focus_there_and_back(ops in prop::collection::vec(op_strategy(), 0..30)) {
        let mut tree = LayoutTree::tiled(4, 16);
        for op in &ops {
            apply(&mut tree, op);
        }
        let start = tree.focus();
        if tree.move_focus(Direction::Right) {
            prop_assert_ne!(tree.focus(), start);
            prop_assert!(tree.view(tree.focus()).is_some());
        } else {
            prop_assert_eq!(tree.focus(), start);
        }
    }
}

#[test]
fn closing_every_pane_ends_at_last_pane() {
    let mut tree = LayoutTree::tiled(5, 16);
    for _ in 0..4 {
        assert_eq!(tree.close(tree.focus()), CloseOutcome::Closed);
    }
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.close(tree.focus()), CloseOutcome::LastPane);
    assert_eq!(tree.len(), 1);
}
