use std::collections::HashSet;

use crate::{core::block::Block, utils::allocator::BlockId};

/// True when `top` sits on `base`: its bottom edge is within `tolerance` of
/// the base's top edge and their horizontal spans intersect.
pub fn is_resting_on(top: &Block, base: &Block, tolerance: f32) -> bool {
    let vertical_contact = (top.bottom() - base.top()).abs() <= tolerance;
    let top_bounds = top.bounds();
    let base_bounds = base.bounds();
    let horizontal_overlap =
        top_bounds.min.x < base_bounds.max.x && base_bounds.min.x < top_bounds.max.x;
    vertical_contact && horizontal_overlap
}

/// Blocks resting directly on `base_id`, in insertion order.
pub fn resting_on(blocks: &[Block], base_id: BlockId, tolerance: f32) -> Vec<BlockId> {
    let Some(base) = blocks.iter().find(|block| block.id == base_id) else {
        return Vec::new();
    };
    blocks
        .iter()
        .filter(|block| block.id != base_id && is_resting_on(block, base, tolerance))
        .map(|block| block.id)
        .collect()
}

/// Every block resting directly or transitively on `base_id`, excluding the
/// base itself. Derived from current positions on every call.
pub fn stack_above(blocks: &[Block], base_id: BlockId, tolerance: f32) -> Vec<BlockId> {
    collect_above(blocks, base_id, tolerance, |_| true)
}

/// Like [`stack_above`], but static blocks are neither collected nor walked
/// through, so nothing above a static block is reached via it.
pub fn movable_stack_above(blocks: &[Block], base_id: BlockId, tolerance: f32) -> Vec<BlockId> {
    collect_above(blocks, base_id, tolerance, |block| !block.is_static)
}

fn collect_above(
    blocks: &[Block],
    base_id: BlockId,
    tolerance: f32,
    admit: impl Fn(&Block) -> bool,
) -> Vec<BlockId> {
    let mut visited = HashSet::new();
    visited.insert(base_id);

    let mut frontier = vec![base_id];
    let mut result = Vec::new();

    while let Some(node) = frontier.pop() {
        for above in resting_on(blocks, node, tolerance) {
            if !visited.insert(above) {
                continue;
            }
            if blocks
                .iter()
                .find(|block| block.id == above)
                .is_some_and(|block| admit(block))
            {
                result.push(above);
                frontier.push(above);
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_id(mut block: Block, raw: u64) -> Block {
        block.id = BlockId::new(raw);
        block
    }

    #[test]
    fn resting_requires_both_contact_and_overlap() {
        let base = Block::new(0.0, 2.0, 2.0, 1.0);
        let on_top = Block::new(0.5, 1.0, 1.0, 1.0);
        let beside = Block::new(2.5, 1.0, 1.0, 1.0);
        let floating = Block::new(0.5, 0.5, 1.0, 1.0);

        assert!(is_resting_on(&on_top, &base, 0.05));
        assert!(!is_resting_on(&beside, &base, 0.05));
        assert!(!is_resting_on(&floating, &base, 0.05));
        assert!(!is_resting_on(&base, &on_top, 0.05));
    }

    #[test]
    fn stack_includes_transitive_layers_once() {
        let blocks = vec![
            with_id(Block::new(0.0, 3.0, 3.0, 1.0), 0),
            with_id(Block::new(0.0, 2.0, 1.0, 1.0), 1),
            with_id(Block::new(2.0, 2.0, 1.0, 1.0), 2),
            // Bridges both middle blocks, so it is reachable twice.
            with_id(Block::new(0.5, 1.0, 2.0, 1.0), 3),
            with_id(Block::new(5.0, 2.0, 1.0, 1.0), 4),
        ];

        let mut stack = stack_above(&blocks, BlockId::new(0), 0.05);
        stack.sort();
        assert_eq!(stack, vec![BlockId::new(1), BlockId::new(2), BlockId::new(3)]);
    }

    #[test]
    fn missing_base_has_empty_stack() {
        let blocks = vec![with_id(Block::new(0.0, 0.0, 1.0, 1.0), 0)];
        assert!(stack_above(&blocks, BlockId::new(9), 0.05).is_empty());
    }

    #[test]
    fn movable_stack_stops_at_static_blocks() {
        let mut shelf = with_id(Block::new(0.0, 2.0, 1.0, 1.0), 1);
        shelf.is_static = true;
        let blocks = vec![
            with_id(Block::new(0.0, 3.0, 3.0, 1.0), 0),
            shelf,
            with_id(Block::new(0.0, 1.0, 1.0, 1.0), 2),
            with_id(Block::new(2.0, 2.0, 1.0, 1.0), 3),
        ];

        assert_eq!(stack_above(&blocks, BlockId::new(0), 0.05).len(), 3);
        assert_eq!(
            movable_stack_above(&blocks, BlockId::new(0), 0.05),
            vec![BlockId::new(3)]
        );
    }
}
