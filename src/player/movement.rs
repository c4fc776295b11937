use bevy::prelude::*;
use crate::shared::*;

/// Move `position` along `axis` for one frame and keep it inside the farm.
///
/// `axis` is expected to be at most unit length (the input plugin already
/// shortens diagonals).
pub fn step(position: Vec2, axis: Vec2, speed: f32, delta_secs: f32, layout: &FarmLayout) -> Vec2 {
    let moved = position + axis * speed * delta_secs;
    let max = grid_to_world(layout.width - 1, layout.height - 1);
    moved.clamp(Vec2::ZERO, max.max(Vec2::ZERO))
}

/// Applies the input axis, updates facing and idle,
/// and keeps `GridPosition` in sync for tile lookups.
pub fn player_movement(
    time: Res<Time>,
    input: Res<PlayerInput>,
    layout: Res<FarmLayout>,
    mut query: Query<
        (&mut Transform, &mut PlayerMovement, &mut GridPosition, &mut Sprite),
        With<Player>,
    >,
) {
    let Ok((mut transform, mut movement, mut grid_pos, mut sprite)) = query.get_single_mut() else {
        return;
    };

    let axis = input.move_axis;
    movement.is_idle = axis == Vec2::ZERO;
    if movement.is_idle {
        return;
    }

    // Only a horizontal component changes facing; pure vertical keeps it.
    if axis.x < 0.0 {
        movement.facing_left = true;
    } else if axis.x > 0.0 {
        movement.facing_left = false;
    }
    sprite.flip_x = movement.facing_left;

    let next = step(
        transform.translation.truncate(),
        axis,
        movement.speed,
        time.delta_secs(),
        &layout,
    );
    transform.translation.x = next.x;
    transform.translation.y = next.y;

    let (gx, gy) = world_to_grid(next.x, next.y);
    if grid_pos.x != gx || grid_pos.y != gy {
        grid_pos.x = gx;
        grid_pos.y = gy;
    }
}
