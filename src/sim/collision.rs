//! Hit detection between the player and shoppers
//!
//! Body contact is a plain strict AABB test. Attacks are directional: the
//! weapon extends the player's box only on the side it is facing, so an
//! enemy standing behind the player is never struck.

use super::state::Facing;
use crate::Rect;

/// Strict horizontal overlap (touching edges do not count)
#[inline]
fn overlaps_x(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left()
}

/// Strict vertical overlap (touching edges do not count)
#[inline]
fn overlaps_y(a: &Rect, b: &Rect) -> bool {
    a.top() < b.bottom() && a.bottom() > b.top()
}

/// Strict axis-aligned rectangle intersection
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    overlaps_x(a, b) && overlaps_y(a, b)
}

/// Whether an attack from `player` facing `facing` with `range` reaches `enemy`
pub fn attack_hits(player: &Rect, facing: Facing, range: f32, enemy: &Rect) -> bool {
    let in_reach = match facing {
        Facing::Left => player.left() - range < enemy.right() && player.left() > enemy.left(),
        Facing::Right => player.right() + range > enemy.left() && player.left() < enemy.right(),
    };
    in_reach && overlaps_y(player, enemy)
}
