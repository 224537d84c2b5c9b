//! Drawing primitives the plain SDL2 renderer lacks
//!
//! SDL2 only fills rectangles and strokes lines, so ellipses and triangles
//! are filled here one horizontal span at a time.

use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;

/// Clear the whole frame to `color`
pub fn clear(canvas: &mut Canvas<Window>, color: Color) {
    canvas.set_draw_color(color);
    canvas.clear();
}

/// Fill `rect` with a solid colour
pub fn fill_rect(canvas: &mut Canvas<Window>, rect: Rect, color: Color) -> Result<(), String> {
    canvas.set_draw_color(color);
    canvas.fill_rect(rect)
}

/// Stroke the outline of `rect`, `thickness` pixels wide (drawn inward)
pub fn outline_rect(
    canvas: &mut Canvas<Window>,
    rect: Rect,
    color: Color,
    thickness: u32,
) -> Result<(), String> {
    canvas.set_draw_color(color);
    for inset in 0..thickness {
        let w = rect.width().saturating_sub(2 * inset);
        let h = rect.height().saturating_sub(2 * inset);
        if w == 0 || h == 0 {
            break;
        }
        canvas.draw_rect(Rect::new(
            rect.x() + inset as i32,
            rect.y() + inset as i32,
            w,
            h,
        ))?;
    }
    Ok(())
}

/// Black overlay across the whole canvas; `alpha` 0 is invisible, 255 opaque
pub fn dim_overlay(canvas: &mut Canvas<Window>, alpha: u8) -> Result<(), String> {
    canvas.set_blend_mode(BlendMode::Blend);
    canvas.set_draw_color(Color::RGBA(0, 0, 0, alpha));
    let result = canvas.fill_rect(None);
    canvas.set_blend_mode(BlendMode::None);
    result
}

/// Horizontal half-widths of an ellipse inscribed in a `width` x `height`
/// box, one entry per pixel row
fn ellipse_spans(width: u32, height: u32) -> Vec<i32> {
    let a = width as f32 / 2.0;
    let b = height as f32 / 2.0;

    (0..height)
        .map(|row| {
            // Sample the middle of the pixel row
            let dy = row as f32 + 0.5 - b;
            let t = 1.0 - (dy * dy) / (b * b);
            (a * t.max(0.0).sqrt()).round() as i32
        })
        .collect()
}

/// Fill the ellipse inscribed in `bounds`
pub fn fill_ellipse(canvas: &mut Canvas<Window>, bounds: Rect, color: Color) -> Result<(), String> {
    canvas.set_draw_color(color);
    let center_x = bounds.x() + bounds.width() as i32 / 2;

    for (row, half) in ellipse_spans(bounds.width(), bounds.height()).into_iter().enumerate() {
        if half == 0 {
            continue;
        }
        let y = bounds.y() + row as i32;
        canvas.draw_line(Point::new(center_x - half, y), Point::new(center_x + half - 1, y))?;
    }
    Ok(())
}

/// x-range covered by the triangle on scanline `y`, if any
fn triangle_span(points: [Point; 3], y: i32) -> Option<(i32, i32)> {
    let mut xs = Vec::with_capacity(2);
    let sample_y = y as f32 + 0.5;

    for i in 0..3 {
        let p = points[i];
        let q = points[(i + 1) % 3];
        let (y0, y1) = (p.y() as f32, q.y() as f32);
        if (y0 <= sample_y && sample_y < y1) || (y1 <= sample_y && sample_y < y0) {
            let t = (sample_y - y0) / (y1 - y0);
            xs.push(p.x() as f32 + t * (q.x() - p.x()) as f32);
        }
    }

    let min = xs.iter().cloned().fold(f32::INFINITY, f32::min);
    let max = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    (xs.len() >= 2).then(|| (min.round() as i32, max.round() as i32))
}

/// Fill a triangle given its three corners
pub fn fill_triangle(canvas: &mut Canvas<Window>, points: [Point; 3], color: Color) -> Result<(), String> {
    canvas.set_draw_color(color);
    let top = points.iter().map(|p| p.y()).min().unwrap_or(0);
    let bottom = points.iter().map(|p| p.y()).max().unwrap_or(0);

    for y in top..bottom {
        if let Some((x0, x1)) = triangle_span(points, y) {
            if x1 > x0 {
                canvas.draw_line(Point::new(x0, y), Point::new(x1 - 1, y))?;
            }
        }
    }
    Ok(())
}
