/// AABB collision helpers shared by every game
///
/// All games collide plain `sdl2::rect::Rect`s. Rects use exclusive upper
/// bounds, so two rects that only touch along an edge do not collide.
use sdl2::rect::{Point, Rect};

/// Checks if two axis-aligned bounding boxes intersect.
///
/// Two rectangles intersect if their intervals overlap on both the X and
/// Y axes.
pub fn aabb_intersect(a: &Rect, b: &Rect) -> bool {
    let x_overlap = a.x() < b.x() + b.width() as i32 && a.x() + a.width() as i32 > b.x();
    let y_overlap = a.y() < b.y() + b.height() as i32 && a.y() + a.height() as i32 > b.y();

    x_overlap && y_overlap
}

/// Index of the first rect in `others` that `rect` intersects.
pub fn first_collision(rect: &Rect, others: &[Rect]) -> Option<usize> {
    others.iter().position(|other| aabb_intersect(rect, other))
}

/// True if any rect in `others` intersects `rect`.
pub fn collides_with_any(rect: &Rect, others: &[Rect]) -> bool {
    first_collision(rect, others).is_some()
}

/// Checks whether a pointer position falls inside `rect`.
pub fn contains_point(rect: &Rect, x: i32, y: i32) -> bool {
    rect.contains_point(Point::new(x, y))
}

/// Moves `rect` horizontally by `dx` unless the move starts at the field
/// edge it is heading toward.
///
/// Mirrors the classic "only move while `left > 0` / `right < width`"
/// paddle rule, so a rect can poke at most one step past an edge.
pub fn step_horizontal(rect: &mut Rect, dx: i32, field_width: i32) {
    if dx < 0 && rect.left() > 0 {
        rect.offset(dx, 0);
    } else if dx > 0 && rect.right() < field_width {
        rect.offset(dx, 0);
    }
}

/// Vertical counterpart of [`step_horizontal`].
pub fn step_vertical(rect: &mut Rect, dy: i32, field_height: i32) {
    if dy < 0 && rect.top() > 0 {
        rect.offset(0, dy);
    } else if dy > 0 && rect.bottom() < field_height {
        rect.offset(0, dy);
    }
}

/// Pulls `rect` back inside `0..field_height`. Returns true if it had left.
pub fn clamp_vertical(rect: &mut Rect, field_height: i32) -> bool {
    if rect.top() < 0 {
        rect.set_y(0);
        true
    } else if rect.bottom() > field_height {
        rect.set_y(field_height - rect.height() as i32);
        true
    } else {
        false
    }
}
