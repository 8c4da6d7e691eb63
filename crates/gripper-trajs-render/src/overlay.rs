use gripper_trajs_core::{Detection, PixelPoint};
use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::draw::draw_hollow_rect_mut;

/// Style for detection bounding-box overlays.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct OverlayStyle {
    pub box_color: [u8; 3],
    pub thickness: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            box_color: [255, 165, 0],
            thickness: 2,
        }
    }
}

/// Draw the detection's bounding box onto `img`.
pub fn render_detection(img: &mut RgbImage, detection: &Detection, style: &OverlayStyle) {
    let b = &detection.bbox;
    let top_left = PixelPoint::new(b.x_min.round() as i32, b.y_min.round() as i32);
    let bottom_right = PixelPoint::new(b.x_max.round() as i32, b.y_max.round() as i32);
    draw_hollow_rect_mut(img, top_left, bottom_right, Rgb(style.box_color), style.thickness);
}
