use image::{GrayImage, Luma};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;

const FOREGROUND: Luma<u8> = Luma([255]);

/// Rasterize a contour into a fresh solid mask, boundary pixels included
pub fn apply(width: u32, height: u32, contour: &[Point<i32>]) -> GrayImage {
    let mut mask = GrayImage::new(width, height);

    // the polygon filler rejects a closing point equal to the first
    let mut polygon = contour;
    while polygon.len() > 1 && polygon.first() == polygon.last() {
        polygon = &polygon[..polygon.len() - 1];
    }
    if polygon.len() >= 3 {
        draw_polygon_mut(&mut mask, polygon, FOREGROUND);
    }

    for p in contour {
        if p.x >= 0 && p.y >= 0 && (p.x as u32) < width && (p.y as u32) < height {
            mask.put_pixel(p.x as u32, p.y as u32, FOREGROUND);
        }
    }

    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Clockwise boundary pixels of an inclusive rectangle
    fn ring(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Point<i32>> {
        let mut points = Vec::new();
        points.extend((x0..=x1).map(|x| Point::new(x, y0)));
        points.extend((y0 + 1..=y1).map(|y| Point::new(x1, y)));
        points.extend((x0..x1).rev().map(|x| Point::new(x, y1)));
        points.extend((y0 + 1..y1).rev().map(|y| Point::new(x0, y)));
        points
    }

    #[test]
    fn test_fill_rectangle_contour() {
        let mask = apply(10, 8, &ring(2, 1, 6, 4));

        for y in 0..8 {
            for x in 0..10 {
                let inside = (2..=6).contains(&x) && (1..=4).contains(&y);
                assert_eq!(
                    mask.get_pixel(x, y).0[0] == 255,
                    inside,
                    "pixel ({}, {})",
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn test_single_point_contour() {
        let mask = apply(5, 5, &[Point::new(2, 3)]);
        assert_eq!(mask.get_pixel(2, 3).0[0], 255);
        assert_eq!(mask.pixels().filter(|p| p.0[0] != 0).count(), 1);
    }

    #[test]
    fn test_closed_contour_is_accepted() {
        let mut contour = ring(0, 0, 3, 3);
        contour.push(Point::new(0, 0));

        let mask = apply(4, 4, &contour);

        assert!(mask.pixels().all(|p| p.0[0] == 255));
    }
}
