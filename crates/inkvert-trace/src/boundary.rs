//! Region boundary extraction.
//!
//! Walks the pixel-edge lattice with the foreground always on the
//! right of the travel direction, producing one closed boundary per
//! connected region. Traced regions are erased from the bitmap by
//! XOR-filling their interior, which both removes them from the scan
//! and turns any enclosed holes into fresh foreground so they are
//! traced as their own boundaries on later iterations.

use std::collections::BTreeMap;

use crate::bitmap::Bitmap;
use crate::params::TurnPolicy;

/// One traced region: its closed boundary on the lattice, and the
/// pixel area enclosed (holes included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Closed loop of lattice points; consecutive points differ by one
    /// unit step and the last point connects back to the first.
    pub boundary: Vec<(i64, i64)>,
    /// Enclosed area in pixels.
    pub area: u64,
}

/// Decompose the bitmap into region boundaries, consuming it.
///
/// Regions smaller than `turd_size` pixels are erased but not
/// reported. The scan is raster order, so output order is
/// deterministic for a given bitmap.
pub fn decompose(bitmap: &mut Bitmap, turd_size: u32, policy: TurnPolicy) -> Vec<Region> {
    let mut regions = Vec::new();
    let mut cursor = 0;
    while let Some((x, y)) = bitmap.next_foreground(cursor) {
        cursor = bitmap.index(x, y);
        let boundary = walk_boundary(bitmap, x, y, policy);
        let area = erase_interior(bitmap, &boundary);
        if area >= u64::from(turd_size) {
            regions.push(Region { boundary, area });
        }
    }
    regions
}

/// Walk one region boundary clockwise (in raster orientation),
/// starting from the region's first pixel in raster order.
///
/// The start pixel has background above and to its left, so the walk
/// begins at its top-left lattice corner heading east along the top
/// edge. At each lattice point the two pixels ahead decide the next
/// step; only the checkerboard case is ambiguous and defers to the
/// turn policy.
#[allow(clippy::cast_possible_wrap)]
fn walk_boundary(bitmap: &Bitmap, start_x: usize, start_y: usize, policy: TurnPolicy) -> Vec<(i64, i64)> {
    let start = (start_x as i64, start_y as i64);
    let (mut x, mut y) = start;
    let (mut dx, mut dy) = (1_i64, 0_i64);
    let mut points = Vec::new();
    // A boundary visits each of the four orientations of a lattice
    // point at most once.
    let limit = 4 * (bitmap.width() + 1) * (bitmap.height() + 1) + 4;
    for _ in 0..limit {
        points.push((x, y));
        x += dx;
        y += dy;
        if (x, y) == start {
            break;
        }
        let (front_left, front_right) = match (dx, dy) {
            (1, 0) => (bitmap.get(x, y - 1), bitmap.get(x, y)),
            (0, 1) => (bitmap.get(x, y), bitmap.get(x - 1, y)),
            (-1, 0) => (bitmap.get(x - 1, y), bitmap.get(x - 1, y - 1)),
            _ => (bitmap.get(x - 1, y - 1), bitmap.get(x, y - 1)),
        };
        match (front_left, front_right) {
            // Boundary continues straight ahead.
            (false, true) => {}
            // Inside corner.
            (true, true) => (dx, dy) = (dy, -dx),
            // Outside corner.
            (false, false) => (dx, dy) = (-dy, dx),
            // Checkerboard: both turns are legal.
            (true, false) => {
                let turn_right = match policy {
                    TurnPolicy::Right => true,
                    TurnPolicy::Left => false,
                    TurnPolicy::Majority => majority(bitmap, x, y),
                    TurnPolicy::Minority => !majority(bitmap, x, y),
                };
                if turn_right {
                    (dx, dy) = (-dy, dx);
                } else {
                    (dx, dy) = (dy, -dx);
                }
            }
        }
    }
    points
}

/// Foreground-majority probe around a lattice point, widening the
/// ring until a side wins.
fn majority(bitmap: &Bitmap, x: i64, y: i64) -> bool {
    for radius in 2_i64..5 {
        let mut score = 0_i64;
        for a in (1 - radius)..radius {
            score += i64::from(bitmap.get(x + a, y + radius - 1));
            score += i64::from(bitmap.get(x + radius - 1, y + a - 1));
            score += i64::from(bitmap.get(x + a - 1, y - radius));
            score += i64::from(bitmap.get(x - radius, y + a));
            score -= 2;
        }
        if score > 0 {
            return true;
        }
        if score < 0 {
            return false;
        }
    }
    false
}

/// XOR-fill the interior of a closed boundary, returning the enclosed
/// pixel area.
///
/// Only vertical boundary edges matter: on each pixel row, membership
/// flips between consecutive crossings, so flipping the spans between
/// sorted crossing pairs erases exactly the interior.
#[allow(clippy::cast_sign_loss)]
fn erase_interior(bitmap: &mut Bitmap, boundary: &[(i64, i64)]) -> u64 {
    let mut crossings: BTreeMap<i64, Vec<i64>> = BTreeMap::new();
    let n = boundary.len();
    for i in 0..n {
        let p = boundary[i];
        let q = boundary[(i + 1) % n];
        if p.0 == q.0 && (p.1 - q.1).abs() == 1 {
            crossings.entry(p.1.min(q.1)).or_default().push(p.0);
        }
    }
    let mut area = 0;
    for (row, mut xs) in crossings {
        xs.sort_unstable();
        for pair in xs.chunks_exact(2) {
            for x in pair[0]..pair[1] {
                bitmap.flip(x, row);
            }
            area += (pair[1] - pair[0]) as u64;
        }
    }
    area
}
