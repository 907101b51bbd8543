//! Icon generation: fit an outline into a square preview box

use crate::geometry::path::{normalize_path, PathError};
use geo::{AffineTransform, BoundingRect, Coord, MultiPoint, Point as GeoPoint, Rect};
use svgtypes::{SimplePathSegment, SimplifyingPathParser};

/// Steps used to sample each Bézier segment when measuring its extent
const CURVE_SAMPLES: usize = 16;

/// Build the icon path for an already normalized outline
///
/// The outline is scaled uniformly so its larger dimension fills
/// `preview_size`, then centered inside the `preview_size` square.
pub fn icon_path(outline: &str, preview_size: f64, precision: u32) -> Result<String, PathError> {
    let segments = simplify(outline)?;
    let bounds = extent(&segments).ok_or(PathError::Empty)?;
    let transform = fit_transform(bounds, preview_size);

    let mut data = String::with_capacity(segments.len() * 16);
    for segment in &segments {
        data.push_str(&transformed_segment(segment, &transform));
    }
    normalize_path(&data, precision)
}

fn simplify(outline: &str) -> Result<Vec<SimplePathSegment>, PathError> {
    SimplifyingPathParser::from(outline)
        .map(|segment| segment.map_err(|e| PathError::Parse(e.to_string())))
        .collect()
}

fn cubic(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    mt * mt * mt * p0 + 3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t * p3
}

fn quadratic(p0: f64, p1: f64, p2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    mt * mt * p0 + 2.0 * mt * t * p1 + t * t * p2
}

/// Axis-aligned bounding box of the drawn path
pub fn extent(segments: &[SimplePathSegment]) -> Option<Rect<f64>> {
    let mut points: Vec<GeoPoint<f64>> = Vec::with_capacity(segments.len() * 2);
    let mut current = (0.0, 0.0);

    for segment in segments {
        match *segment {
            SimplePathSegment::MoveTo { x, y } | SimplePathSegment::LineTo { x, y } => {
                points.push(GeoPoint::new(x, y));
                current = (x, y);
            }
            SimplePathSegment::CurveTo { x1, y1, x2, y2, x, y } => {
                for step in 1..=CURVE_SAMPLES {
                    let t = step as f64 / CURVE_SAMPLES as f64;
                    points.push(GeoPoint::new(
                        cubic(current.0, x1, x2, x, t),
                        cubic(current.1, y1, y2, y, t),
                    ));
                }
                current = (x, y);
            }
            SimplePathSegment::Quadratic { x1, y1, x, y } => {
                for step in 1..=CURVE_SAMPLES {
                    let t = step as f64 / CURVE_SAMPLES as f64;
                    points.push(GeoPoint::new(
                        quadratic(current.0, x1, x, t),
                        quadratic(current.1, y1, y, t),
                    ));
                }
                current = (x, y);
            }
            SimplePathSegment::ClosePath => {}
        }
    }

    MultiPoint::new(points).bounding_rect()
}

/// Uniform scale and translation placing `bounds` centered in the preview square
pub fn fit_transform(bounds: Rect<f64>, preview_size: f64) -> AffineTransform<f64> {
    let (w, h) = (bounds.width(), bounds.height());
    let k = match (w > 0.0, h > 0.0) {
        (true, true) => (preview_size / w).min(preview_size / h),
        (true, false) => preview_size / w,
        (false, true) => preview_size / h,
        (false, false) => 1.0,
    };
    let min = bounds.min();
    let dx = (preview_size - w * k) / 2.0;
    let dy = (preview_size - h * k) / 2.0;

    // x' = k * (x - min.x) + dx, likewise for y
    AffineTransform::new(k, 0.0, dx - k * min.x, 0.0, k, dy - k * min.y)
}

fn transformed_segment(segment: &SimplePathSegment, transform: &AffineTransform<f64>) -> String {
    let p = |x: f64, y: f64| {
        let c = transform.apply(Coord { x, y });
        format!("{},{}", c.x, c.y)
    };
    match *segment {
        SimplePathSegment::MoveTo { x, y } => format!("M{} ", p(x, y)),
        SimplePathSegment::LineTo { x, y } => format!("L{} ", p(x, y)),
        SimplePathSegment::CurveTo { x1, y1, x2, y2, x, y } => {
            format!("C{} {} {} ", p(x1, y1), p(x2, y2), p(x, y))
        }
        SimplePathSegment::Quadratic { x1, y1, x, y } => format!("Q{} {} ", p(x1, y1), p(x, y)),
        SimplePathSegment::ClosePath => "Z ".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_outline_scaled_and_centered_vertically() {
        let icon = icon_path("M0,0 200,0 200,100 0,100z", 100.0, 1).unwrap();
        assert_eq!(icon, "M0,25 100,25 100,75 0,75z");
    }

    #[test]
    fn test_tall_outline_centered_horizontally() {
        let icon = icon_path("M10,10 30,10 30,50 10,50z", 100.0, 1).unwrap();
        assert_eq!(icon, "M25,0 75,0 75,100 25,100z");
    }

    #[test]
    fn test_offset_outline_moved_to_origin() {
        let icon = icon_path("M510,510 L610,510 L610,610 Z", 50.0, 1).unwrap();
        assert_eq!(icon, "M0,0 50,0 50,50z");
    }

    #[test]
    fn test_fit_scale_factor() {
        let bounds = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 200.0, y: 100.0 });
        let transform = fit_transform(bounds, 100.0);
        let corner = transform.apply(Coord { x: 200.0, y: 100.0 });
        assert!((corner.x - 100.0).abs() < 1e-9);
        assert!((corner.y - 75.0).abs() < 1e-9);
        let origin = transform.apply(Coord { x: 0.0, y: 0.0 });
        assert!((origin.y - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_curve_extent_uses_drawn_shape() {
        // control points reach y = 100 but the curve only reaches y = 75
        let segments = simplify("M0,0 C0,100 100,100 100,0").unwrap();
        let rect = extent(&segments).unwrap();
        assert!((rect.max().y - 75.0).abs() < 1e-9);
        assert_eq!(rect.width(), 100.0);
    }

    #[test]
    fn test_degenerate_line_keeps_non_zero_dimension() {
        let icon = icon_path("M0,0 L50,0", 100.0, 1).unwrap();
        assert_eq!(icon, "M0,50 100,50");
    }
}
