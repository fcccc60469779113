use image::{imageops, GrayImage};
use imageproc::contours::{find_contours, BorderType};
use imageproc::point::Point;
use serde::Serialize;

/// Axis-aligned bounds of a contour, inclusive of its boundary pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingRect {
    pub fn of(points: &[Point<i32>]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Some(Self {
            x: min_x.max(0) as u32,
            y: min_y.max(0) as u32,
            width: (max_x - min_x + 1) as u32,
            height: (max_y - min_y + 1) as u32,
        })
    }
}

/// The largest connected foreground region of a mask
#[derive(Debug, Clone)]
pub struct ForegroundRegion {
    pub contour: Vec<Point<i32>>,
    pub area: f64,
    pub bounds: BoundingRect,
}

/// Outermost borders of the non-zero regions in a mask
/// Holes and anything nested inside a hole are ignored
///
/// Everything outside the image counts as background, so regions touching the
/// edges (or covering the whole mask) still get an outer border.
pub fn external(mask: &GrayImage) -> Vec<Vec<Point<i32>>> {
    let mut padded = GrayImage::new(mask.width() + 2, mask.height() + 2);
    imageops::replace(&mut padded, mask, 1, 1);

    find_contours::<i32>(&padded)
        .into_iter()
        .filter(|c| c.parent.is_none() && matches!(c.border_type, BorderType::Outer))
        .map(|c| {
            c.points
                .into_iter()
                .map(|p| Point::new(p.x - 1, p.y - 1))
                .collect()
        })
        .collect()
}

/// Enclosed polygon area (shoelace formula)
pub fn polygon_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut twice_area = 0i64;
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        twice_area += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }

    twice_area.abs() as f64 / 2.0
}

/// Pick the contour with the largest area
/// Ties keep the contour found first; `None` when there are no contours
pub fn select_largest(contours: Vec<Vec<Point<i32>>>) -> Option<ForegroundRegion> {
    let mut best: Option<(Vec<Point<i32>>, f64)> = None;

    for contour in contours {
        let area = polygon_area(&contour);
        let larger = best.as_ref().map_or(true, |(_, best_area)| area > *best_area);
        if larger {
            best = Some((contour, area));
        }
    }

    let (contour, area) = best?;
    let bounds = BoundingRect::of(&contour)?;
    Some(ForegroundRegion {
        contour,
        area,
        bounds,
    })
}
