//! Geometry helpers shared by render backends.

use folio_types::{Point, Rect};

/// Bezier handle length for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// Fraction of the font size between the top of a line box and its baseline.
pub const BASELINE_RATIO: f32 = 0.8;

/// Convert layout Y coordinate to PDF Y coordinate (flip origin)
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}

/// Baseline y for text whose line box starts at `top`.
pub fn baseline(top: f32, font_size: f32) -> f32 {
    top + font_size * BASELINE_RATIO
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    CurveTo(Point, Point, Point),
    Close,
}

/// Outline of a rectangle with circular corners, clockwise from the top-left.
pub fn rounded_rect_path(rect: Rect, radius: f32) -> Vec<PathSegment> {
    let r = radius.clamp(0.0, rect.width.min(rect.height) / 2.0);
    let k = r * KAPPA;
    let (x0, y0, x1, y1) = (rect.x, rect.y, rect.right(), rect.bottom());
    let p = Point::new;

    vec![
        PathSegment::MoveTo(p(x0 + r, y0)),
        PathSegment::LineTo(p(x1 - r, y0)),
        PathSegment::CurveTo(p(x1 - r + k, y0), p(x1, y0 + r - k), p(x1, y0 + r)),
        PathSegment::LineTo(p(x1, y1 - r)),
        PathSegment::CurveTo(p(x1, y1 - r + k), p(x1 - r + k, y1), p(x1 - r, y1)),
        PathSegment::LineTo(p(x0 + r, y1)),
        PathSegment::CurveTo(p(x0 + r - k, y1), p(x0, y1 - r + k), p(x0, y1 - r)),
        PathSegment::LineTo(p(x0, y0 + r)),
        PathSegment::CurveTo(p(x0, y0 + r - k), p(x0 + r - k, y0), p(x0 + r, y0)),
        PathSegment::Close,
    ]
}

/// Outline of the ellipse inscribed in `rect`.
pub fn ellipse_path(rect: Rect) -> Vec<PathSegment> {
    let c = rect.center();
    let (rx, ry) = (rect.width / 2.0, rect.height / 2.0);
    let (kx, ky) = (rx * KAPPA, ry * KAPPA);
    let p = Point::new;

    vec![
        PathSegment::MoveTo(p(c.x, c.y - ry)),
        PathSegment::CurveTo(p(c.x + kx, c.y - ry), p(c.x + rx, c.y - ky), p(c.x + rx, c.y)),
        PathSegment::CurveTo(p(c.x + rx, c.y + ky), p(c.x + kx, c.y + ry), p(c.x, c.y + ry)),
        PathSegment::CurveTo(p(c.x - kx, c.y + ry), p(c.x - rx, c.y + ky), p(c.x - rx, c.y)),
        PathSegment::CurveTo(p(c.x - rx, c.y - ky), p(c.x - kx, c.y - ry), p(c.x, c.y - ry)),
        PathSegment::Close,
    ]
}

/// Point on a circle. Degrees run clockwise from twelve o'clock in top-left coordinates.
pub fn point_on_circle(center: Point, radius: f32, degrees: f32) -> Point {
    let radians = degrees.to_radians();
    Point::new(center.x + radius * radians.sin(), center.y - radius * radians.cos())
}

/// Approximates a circular arc with cubic Bezier segments of at most 90 degrees each.
pub fn arc_path(
    center: Point,
    radius: f32,
    start_degrees: f32,
    sweep_degrees: f32,
) -> Vec<PathSegment> {
    let sweep = sweep_degrees.clamp(-360.0, 360.0);
    let mut segments = vec![PathSegment::MoveTo(point_on_circle(center, radius, start_degrees))];
    if sweep == 0.0 || radius <= 0.0 {
        return segments;
    }

    let pieces = (sweep.abs() / 90.0).ceil().max(1.0) as usize;
    let step = sweep / pieces as f32;
    let handle = 4.0 / 3.0 * (step.to_radians() / 4.0).tan() * radius;

    for i in 0..pieces {
        let a0 = start_degrees + step * i as f32;
        let a1 = a0 + step;
        let p0 = point_on_circle(center, radius, a0);
        let p3 = point_on_circle(center, radius, a1);
        // Tangent direction of a clockwise sweep at angle a: (cos a, sin a).
        let (r0, r1) = (a0.to_radians(), a1.to_radians());
        let c1 = Point::new(p0.x + handle * r0.cos(), p0.y + handle * r0.sin());
        let c2 = Point::new(p3.x - handle * r1.cos(), p3.y - handle * r1.sin());
        segments.push(PathSegment::CurveTo(c1, c2, p3));
    }
    segments
}

/// Vertices of a five-pointed star centered on `center`, first point straight up.
pub fn star_points(center: Point, outer_radius: f32, inner_radius: f32) -> Vec<Point> {
    (0..10)
        .map(|i| {
            let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
            let degrees = i as f32 * 36.0;
            point_on_circle(center, radius, degrees)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 0.01 && (a.y - b.y).abs() < 0.01
    }

    #[test]
    fn flip_converts_top_left_to_bottom_left() {
        assert_eq!(flip_y(72.0, 792.0), 720.0);
    }

    #[test]
    fn quarter_arc_ends_at_three_oclock() {
        let center = Point::new(100.0, 100.0);
        let path = arc_path(center, 50.0, 0.0, 90.0);
        assert_eq!(path.len(), 2);
        assert!(matches!(path[0], PathSegment::MoveTo(p) if close(p, Point::new(100.0, 50.0))));
        assert!(matches!(
            path[1],
            PathSegment::CurveTo(_, _, p) if close(p, Point::new(150.0, 100.0))
        ));
    }

    #[test]
    fn full_circle_uses_four_segments() {
        let path = arc_path(Point::new(0.0, 0.0), 10.0, 0.0, 360.0);
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn rounded_radius_is_clamped_to_half_the_short_side() {
        let path = rounded_rect_path(Rect::new(0.0, 0.0, 100.0, 20.0), 50.0);
        assert!(matches!(path[0], PathSegment::MoveTo(p) if close(p, Point::new(10.0, 0.0))));
    }

    #[test]
    fn star_has_ten_vertices_starting_at_the_top() {
        let points = star_points(Point::new(0.0, 0.0), 10.0, 4.0);
        assert_eq!(points.len(), 10);
        assert!(close(points[0], Point::new(0.0, -10.0)));
    }
}
