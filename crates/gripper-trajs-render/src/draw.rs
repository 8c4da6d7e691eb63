//! Thick-stroke raster primitives on RGB images.
//!
//! All strokes are drawn by stamping a small filled square at each point of
//! the ideal one-pixel curve; out-of-bounds pixels are clipped silently.

use gripper_trajs_core::PixelPoint;
use image::{Rgb, RgbImage};

#[inline]
fn stamp(img: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, thickness: u32) {
    let half = thickness as i32 / 2;
    let span = thickness.max(1) as i32;
    for dy in 0..span {
        for dx in 0..span {
            let px = x + dx - half;
            let py = y + dy - half;
            if px >= 0 && py >= 0 && (px as u32) < img.width() && (py as u32) < img.height() {
                img.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

/// Draw a line segment between `a` and `b` (Bresenham).
pub fn draw_line_mut(
    img: &mut RgbImage,
    a: PixelPoint,
    b: PixelPoint,
    color: Rgb<u8>,
    thickness: u32,
) {
    let dx = (b.x - a.x).abs();
    let dy = -(b.y - a.y).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };

    let mut x = a.x;
    let mut y = a.y;
    let mut err = dx + dy;

    loop {
        stamp(img, x, y, color, thickness);
        if x == b.x && y == b.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Draw a circle outline of `radius` around `center` (midpoint circle).
pub fn draw_hollow_circle_mut(
    img: &mut RgbImage,
    center: PixelPoint,
    radius: i32,
    color: Rgb<u8>,
    thickness: u32,
) {
    if radius <= 0 {
        stamp(img, center.x, center.y, color, thickness);
        return;
    }

    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        for (px, py) in [
            (center.x + x, center.y + y),
            (center.x + y, center.y + x),
            (center.x - y, center.y + x),
            (center.x - x, center.y + y),
            (center.x - x, center.y - y),
            (center.x - y, center.y - x),
            (center.x + y, center.y - x),
            (center.x + x, center.y - y),
        ] {
            stamp(img, px, py, color, thickness);
        }

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Draw an axis-aligned rectangle outline with integer corners
/// `(x_min, y_min)` and `(x_max, y_max)`.
pub fn draw_hollow_rect_mut(
    img: &mut RgbImage,
    top_left: PixelPoint,
    bottom_right: PixelPoint,
    color: Rgb<u8>,
    thickness: u32,
) {
    let tr = PixelPoint::new(bottom_right.x, top_left.y);
    let bl = PixelPoint::new(top_left.x, bottom_right.y);
    draw_line_mut(img, top_left, tr, color, thickness);
    draw_line_mut(img, tr, bottom_right, color, thickness);
    draw_line_mut(img, bottom_right, bl, color, thickness);
    draw_line_mut(img, bl, top_left, color, thickness);
}
