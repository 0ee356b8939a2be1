//! Boundary-to-path-data fitting.
//!
//! Turns a lattice boundary into SVG path data in three passes: drop
//! collinear lattice points, simplify within the optimization
//! tolerance, then emit with quadratic corner smoothing. Corners
//! turning no sharper than `alpha_max * 90°` become quadratic curves
//! through the corner point between neighboring edge midpoints;
//! sharper corners stay as line segments.

/// Fit one closed boundary into SVG path data (`M … Z`).
#[must_use]
pub fn path_data(boundary: &[(i64, i64)], alpha_max: f64, opt_tolerance: f64) -> String {
    let polygon = simplify_closed(corners(boundary), opt_tolerance);
    emit(&polygon, alpha_max)
}

/// Keep only the points where the boundary changes direction.
#[allow(clippy::cast_precision_loss)]
fn corners(boundary: &[(i64, i64)]) -> Vec<(f64, f64)> {
    let n = boundary.len();
    if n < 3 {
        return boundary.iter().map(|&(x, y)| (x as f64, y as f64)).collect();
    }
    let mut out = Vec::new();
    for i in 0..n {
        let prev = boundary[(i + n - 1) % n];
        let cur = boundary[i];
        let next = boundary[(i + 1) % n];
        let u = (cur.0 - prev.0, cur.1 - prev.1);
        let v = (next.0 - cur.0, next.1 - cur.1);
        if u != v {
            out.push((cur.0 as f64, cur.1 as f64));
        }
    }
    out
}

/// Ramer-Douglas-Peucker over a closed polygon, opened at its first
/// vertex. The first vertex is always a direction change (it came out
/// of [`corners`]), so opening there loses nothing.
fn simplify_closed(polygon: Vec<(f64, f64)>, tolerance: f64) -> Vec<(f64, f64)> {
    if polygon.len() < 4 || tolerance <= 0.0 {
        return polygon;
    }
    let mut open = polygon;
    open.push(open[0]);
    let mut simplified = simplify(&open, tolerance);
    simplified.pop();
    simplified
}

fn simplify(points: &[(f64, f64)], tolerance: f64) -> Vec<(f64, f64)> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let first = points[0];
    let last = points[points.len() - 1];
    let mut max_distance = 0.0;
    let mut split = 0;
    for (i, &p) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let d = deviation(p, first, last);
        if d > max_distance {
            max_distance = d;
            split = i;
        }
    }
    if max_distance <= tolerance {
        return vec![first, last];
    }
    let mut left = simplify(&points[..=split], tolerance);
    let right = simplify(&points[split..], tolerance);
    left.pop();
    left.extend(right);
    left
}

/// Perpendicular distance from `p` to the chord `a..b`.
fn deviation(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (ux, uy) = (b.0 - a.0, b.1 - a.1);
    let length = ux.hypot(uy);
    if length < f64::EPSILON {
        return (p.0 - a.0).hypot(p.1 - a.1);
    }
    ((p.0 - a.0) * uy - (p.1 - a.1) * ux).abs() / length
}

/// Exterior turn angle at `cur`, in degrees; 0 for a straight line.
fn turn_degrees(prev: (f64, f64), cur: (f64, f64), next: (f64, f64)) -> f64 {
    let (ux, uy) = (cur.0 - prev.0, cur.1 - prev.1);
    let (vx, vy) = (next.0 - cur.0, next.1 - cur.1);
    let lengths = ux.hypot(uy) * vx.hypot(vy);
    if lengths < f64::EPSILON {
        return 0.0;
    }
    let cosine = ((ux * vx + uy * vy) / lengths).clamp(-1.0, 1.0);
    cosine.acos().to_degrees()
}

fn emit(polygon: &[(f64, f64)], alpha_max: f64) -> String {
    let n = polygon.len();
    if n == 0 {
        return String::new();
    }
    let mid = |a: (f64, f64), b: (f64, f64)| ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0);
    if n < 3 {
        let mut d = format!("M {} {}", fmt(polygon[0].0), fmt(polygon[0].1));
        for p in &polygon[1..] {
            d.push_str(&format!(" L {} {}", fmt(p.0), fmt(p.1)));
        }
        d.push_str(" Z");
        return d;
    }
    let smooth_limit = alpha_max * 90.0;
    let start = mid(polygon[n - 1], polygon[0]);
    let mut d = format!("M {} {}", fmt(start.0), fmt(start.1));
    for i in 0..n {
        let prev = polygon[(i + n - 1) % n];
        let cur = polygon[i];
        let next = polygon[(i + 1) % n];
        let exit = mid(cur, next);
        if turn_degrees(prev, cur, next) <= smooth_limit {
            d.push_str(&format!(
                " Q {} {} {} {}",
                fmt(cur.0),
                fmt(cur.1),
                fmt(exit.0),
                fmt(exit.1)
            ));
        } else {
            d.push_str(&format!(
                " L {} {} L {} {}",
                fmt(cur.0),
                fmt(cur.1),
                fmt(exit.0),
                fmt(exit.1)
            ));
        }
    }
    d.push_str(" Z");
    d
}

/// Lattice-derived coordinates are integers or exact halves; format
/// them without float noise.
#[allow(clippy::cast_possible_truncation)]
fn fmt(value: f64) -> String {
    if (value - value.round()).abs() < 1e-6 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.1}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SQUARE: [(i64, i64); 4] = [(0, 0), (1, 0), (1, 1), (0, 1)];

    #[test]
    fn square_with_loose_alpha_is_all_curves() {
        let d = path_data(&SQUARE, 1.0, 0.18);
        assert!(d.starts_with("M 0 0.5"));
        assert!(d.contains(" Q "));
        assert!(!d.contains(" L "));
        assert!(d.ends_with(" Z"));
    }

    #[test]
    fn square_with_tight_alpha_is_all_lines() {
        let d = path_data(&SQUARE, 0.5, 0.18);
        assert!(d.contains(" L "));
        assert!(!d.contains(" Q "));
    }

    #[test]
    fn collinear_points_are_dropped() {
        // 2x1 rectangle boundary with a redundant midpoint on the top
        // and bottom edges.
        let boundary = [(0, 0), (1, 0), (2, 0), (2, 1), (1, 1), (0, 1)];
        let d = path_data(&boundary, 1.0, 0.18);
        assert!(d.contains("Q 2 0"));
        assert!(!d.contains("Q 1 0"));
    }

    #[test]
    fn path_data_is_deterministic() {
        let boundary = [(0, 0), (3, 0), (3, 2), (2, 2), (2, 3), (0, 3)];
        assert_eq!(path_data(&boundary, 1.0, 0.18), path_data(&boundary, 1.0, 0.18));
    }

    #[test]
    fn empty_boundary_yields_empty_data() {
        assert_eq!(path_data(&[], 1.0, 0.18), "");
    }

    #[test]
    fn deviation_of_point_on_chord_is_zero() {
        assert!(deviation((1.0, 1.0), (0.0, 0.0), (2.0, 2.0)) < 1e-12);
    }

    #[test]
    fn turn_degrees_right_angle() {
        let angle = turn_degrees((0.0, 0.0), (1.0, 0.0), (1.0, 1.0));
        assert!((angle - 90.0).abs() < 1e-9);
    }
}
