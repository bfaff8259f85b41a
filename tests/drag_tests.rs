use approx::assert_abs_diff_eq;
use block_stacker::*;

const DT: f32 = 1.0 / 60.0;

/// Floor, a dynamic base resting on it, and a block resting on the base.
fn stacked_world() -> (World, BlockId, BlockId) {
    let mut world = World::new(20.0, 10.0);
    world
        .add_block(Block::new_static(0.0, 9.0, 20.0, 1.0).with_friction(1.0))
        .unwrap();
    let base = world
        .add_block(Block::new(2.0, 8.0, 2.0, 1.0).with_friction(1.0))
        .unwrap();
    let top = world
        .add_block(Block::new(2.5, 7.0, 1.0, 1.0).with_friction(1.0))
        .unwrap();
    (world, base, top)
}

#[test]
fn drag_start_collects_resting_stack() {
    let (mut world, base, top) = stacked_world();
    assert_eq!(world.stack_above(base), vec![top]);

    assert!(world.start_drag(base, 3.0, 8.5));
    let drag = world.drag_state().expect("drag active");
    assert_eq!(drag.block_id, base);
    assert_eq!(drag.offset, Vec2::new(1.0, 0.5));
    assert_eq!(drag.stack, vec![top]);
    assert!(world.block(base).unwrap().is_dragging);
}

#[test]
fn stacked_block_follows_dragged_base() {
    let (mut world, base, top) = stacked_world();
    let base_start = world.block(base).unwrap().position;
    let top_start = world.block(top).unwrap().position;

    assert!(world.start_drag(base, 3.0, 8.5));
    let mut pointer_x = 3.0;
    for _ in 0..90 {
        pointer_x += 0.05;
        assert!(world.update_drag(pointer_x, 8.5, DT));
        world.step(DT);

        let base_shift = world.block(base).unwrap().position.x - base_start.x;
        let top_shift = world.block(top).unwrap().position.x - top_start.x;
        assert!(
            (base_shift - top_shift).abs() < 0.05,
            "top lags base: {top_shift} vs {base_shift}"
        );
    }

    let base_block = world.block(base).unwrap();
    assert_abs_diff_eq!(base_block.position.x - base_start.x, 4.5, epsilon = 1e-3);
    assert_abs_diff_eq!(base_block.velocity.x, 3.0, epsilon = 1e-2);
}

#[test]
fn block_dropped_onto_dragged_base_is_pulled_along() {
    let (mut world, base, top) = stacked_world();
    world.remove_block(top);

    assert!(world.start_drag(base, 3.0, 8.5));
    // Arrives after the drag started, so it is not part of the carried stack.
    let rider = world
        .add_block(Block::new(2.5, 7.0, 1.0, 1.0).with_friction(1.0))
        .unwrap();
    let rider_start = world.block(rider).unwrap().position.x;

    let mut pointer_x = 3.0;
    for _ in 0..60 {
        pointer_x += 0.04;
        world.update_drag(pointer_x, 8.5, DT);
        world.step(DT);
    }

    let rider_shift = world.block(rider).unwrap().position.x - rider_start;
    assert!(world.drag_state().unwrap().stack.is_empty());
    assert_abs_diff_eq!(rider_shift, 2.4, epsilon = 0.05);
}

#[test]
fn knocked_off_block_stops_following() {
    let (mut world, base, top) = stacked_world();
    assert!(world.start_drag(base, 3.0, 8.5));

    world.block_mut(top).unwrap().position = Vec2::new(10.0, 7.0);
    assert!(world.update_drag(3.5, 8.5, DT));

    assert!(world.drag_state().unwrap().stack.is_empty());
    assert_eq!(world.block(top).unwrap().position, Vec2::new(10.0, 7.0));
}

#[test]
fn dragged_block_pushes_free_block() {
    let mut world = World::new(20.0, 10.0);
    world
        .add_block(Block::new_static(0.0, 9.0, 20.0, 1.0))
        .unwrap();
    let pusher = world.add_block(Block::new(2.0, 8.0, 1.0, 1.0)).unwrap();
    let target = world.add_block(Block::new(3.02, 8.0, 1.0, 1.0)).unwrap();

    world.start_drag(pusher, 2.5, 8.5);
    world.update_drag(2.6, 8.5, DT);
    world.step(DT);

    let pushed = world.block(target).unwrap();
    assert!(pushed.velocity.x > 0.0, "target velocity {:?}", pushed.velocity);
    assert!(pushed.position.x >= 3.1 - 1e-3);
    assert!(detect(world.block(pusher).unwrap(), pushed).is_none());
}

#[test]
fn release_carries_momentum_forward() {
    let (mut world, base, _) = stacked_world();
    world.start_drag(base, 3.0, 8.5);
    world.update_drag(3.1, 8.5, DT);
    world.step(DT);

    assert_eq!(world.end_drag(), Some(base));
    let released = world.block(base).unwrap();
    assert!(!released.is_dragging);
    assert!(released.velocity.x > 0.0);

    let before = released.position.x;
    world.step(DT);
    assert!(world.block(base).unwrap().position.x > before);
}

#[test]
fn starting_a_new_drag_releases_the_previous_one() {
    let (mut world, base, top) = stacked_world();
    assert!(world.start_drag(base, 3.0, 8.5));
    assert!(world.start_drag(top, 3.0, 7.5));

    assert!(!world.block(base).unwrap().is_dragging);
    assert_eq!(world.dragged_block_id(), Some(top));
}
