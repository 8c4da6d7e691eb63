use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in pixel coordinates, `(x_min, y_min)` top-left.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl BoundingBox {
    pub fn new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Sub-pixel box midpoint.
    pub fn center(&self) -> Point2<f32> {
        Point2::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Box midpoint rounded to the nearest integer pixel.
    pub fn center_pixel(&self) -> PixelPoint {
        let c = self.center();
        PixelPoint {
            x: c.x.round() as i32,
            y: c.y.round() as i32,
        }
    }

    pub fn area(&self) -> f32 {
        (self.x_max - self.x_min) * (self.y_max - self.y_min)
    }

    /// Smallest box covering both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }
}

/// One detected gripper instance: a box plus the model's confidence.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub bbox: BoundingBox,
    pub score: f32,
}

/// Integer pixel point, the unit of a rendered trajectory.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Merge multiple gripper detections of one frame into a single instance.
///
/// The merged box is the union of all member boxes. The merged score is the
/// weighted average of the member scores, each weighted by the fraction of
/// the union area its box covers.
///
/// Returns `None` for an empty slice.
pub fn merge_detections(detections: &[Detection]) -> Option<Detection> {
    let (first, rest) = detections.split_first()?;

    let bbox = rest.iter().fold(first.bbox, |acc, d| acc.union(&d.bbox));

    let union_area = bbox.area();
    let mut weight_sum = 0.0f32;
    let mut weighted_score = 0.0f32;
    for d in detections {
        let weight = if union_area > 0.0 {
            d.bbox.area() / union_area
        } else {
            1.0
        };
        weight_sum += weight;
        weighted_score += weight * d.score;
    }

    let score = if weight_sum > 0.0 {
        weighted_score / weight_sum
    } else {
        first.score
    };

    Some(Detection { bbox, score })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn det(x_min: f32, y_min: f32, x_max: f32, y_max: f32, score: f32) -> Detection {
        Detection {
            bbox: BoundingBox::new(x_min, y_min, x_max, y_max),
            score,
        }
    }

    #[test]
    fn center_rounds_to_nearest_pixel() {
        let b = BoundingBox::new(0.0, 0.0, 5.0, 3.0);
        assert_eq!(b.center_pixel(), PixelPoint::new(3, 2));

        let b = BoundingBox::new(10.0, 20.0, 20.0, 40.0);
        assert_eq!(b.center_pixel(), PixelPoint::new(15, 30));
    }

    #[test]
    fn merge_empty_is_none() {
        assert_eq!(merge_detections(&[]), None);
    }

    #[test]
    fn merge_singleton_is_identity() {
        let d = det(1.0, 2.0, 3.0, 4.0, 0.9);
        let merged = merge_detections(&[d]).unwrap();
        assert_eq!(merged.bbox, d.bbox);
        assert_relative_eq!(merged.score, 0.9);
    }

    #[test]
    fn merge_takes_union_box_and_area_weighted_score() {
        // Two 10x10 boxes at opposite corners of a 20x20 union.
        let a = det(0.0, 0.0, 10.0, 10.0, 0.8);
        let b = det(10.0, 10.0, 20.0, 20.0, 0.4);
        let merged = merge_detections(&[a, b]).unwrap();

        assert_eq!(merged.bbox, BoundingBox::new(0.0, 0.0, 20.0, 20.0));
        // Equal areas, equal weights: plain average.
        assert_relative_eq!(merged.score, 0.6, epsilon = 1e-6);
    }

    #[test]
    fn merge_weights_by_member_area() {
        // A 10x10 box and a 20x20 box sharing the origin corner; the union is
        // the larger box, so weights are 0.25 and 1.0.
        let small = det(0.0, 0.0, 10.0, 10.0, 1.0);
        let large = det(0.0, 0.0, 20.0, 20.0, 0.0);
        let merged = merge_detections(&[small, large]).unwrap();

        assert_eq!(merged.bbox, BoundingBox::new(0.0, 0.0, 20.0, 20.0));
        assert_relative_eq!(merged.score, 0.25 / 1.25, epsilon = 1e-6);
    }
}
