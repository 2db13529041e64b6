//! Random obfuscating strokes.
//!
//! Noise is a legibility obstacle for naive OCR, not a security boundary,
//! so stroke geometry and colors come from the fast thread-local generator
//! rather than the CSPRNG that backs answers and nonces.

use image::{Rgba, RgbaImage};
use rand::Rng;

/// Draw `count` random line segments over the canvas.
///
/// Endpoints are uniform over the canvas and each stroke gets a uniform
/// opaque RGB color. A zero count draws nothing.
pub(crate) fn draw(img: &mut RgbaImage, count: u32) {
    let (w, h) = img.dimensions();
    if count == 0 || w == 0 || h == 0 {
        return;
    }
    let mut rng = rand::rng();
    for _ in 0..count {
        let color = Rgba([rng.random(), rng.random(), rng.random(), 255]);
        let from = (rng.random_range(0..w) as i32, rng.random_range(0..h) as i32);
        let to = (rng.random_range(0..w) as i32, rng.random_range(0..h) as i32);
        segment(img, from, to, color);
    }
}

/// Bresenham line rasterizer over signed coordinates.
///
/// Pixels outside the canvas are skipped rather than clamped, so segments
/// may start or end out of bounds.
pub(crate) fn segment(img: &mut RgbaImage, from: (i32, i32), to: (i32, i32), color: Rgba<u8>) {
    let (mut x, mut y) = from;
    let (x1, y1) = to;
    let dx = (x1 - x).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let dy = -(y1 - y).abs();
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
            img.put_pixel(x as u32, y as u32, color);
        }
        if x == x1 && y == y1 {
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

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BG: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn canvas(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, BG)
    }

    #[test]
    fn segment_is_endpoint_inclusive() {
        let mut img = canvas(10, 10);
        segment(&mut img, (1, 1), (8, 8), INK);
        assert_eq!(*img.get_pixel(1, 1), INK);
        assert_eq!(*img.get_pixel(8, 8), INK);
        assert_eq!(*img.get_pixel(4, 4), INK);
        assert_eq!(*img.get_pixel(0, 0), BG);
    }

    #[test]
    fn segment_handles_horizontal_and_vertical() {
        let mut img = canvas(10, 10);
        segment(&mut img, (0, 3), (9, 3), INK);
        segment(&mut img, (5, 0), (5, 9), INK);
        for x in 0..10 {
            assert_eq!(*img.get_pixel(x, 3), INK);
        }
        for y in 0..10 {
            assert_eq!(*img.get_pixel(5, y), INK);
        }
    }

    #[test]
    fn segment_skips_out_of_bounds_pixels() {
        let mut img = canvas(10, 10);
        segment(&mut img, (-5, -5), (15, 15), INK);
        // the diagonal crosses the canvas corner to corner
        assert_eq!(*img.get_pixel(0, 0), INK);
        assert_eq!(*img.get_pixel(9, 9), INK);
        // off-diagonal pixels stay untouched
        assert_eq!(*img.get_pixel(9, 0), BG);
        assert_eq!(*img.get_pixel(0, 9), BG);
    }

    #[test]
    fn segment_draws_single_point() {
        let mut img = canvas(4, 4);
        segment(&mut img, (2, 2), (2, 2), INK);
        assert_eq!(*img.get_pixel(2, 2), INK);
        assert_eq!(img.pixels().filter(|p| **p == INK).count(), 1);
    }

    #[test]
    fn draw_zero_count_is_a_noop() {
        let mut img = canvas(20, 20);
        draw(&mut img, 0);
        assert!(img.pixels().all(|p| *p == BG));
    }

    #[test]
    fn draw_marks_the_canvas() {
        let mut img = canvas(40, 40);
        draw(&mut img, 8);
        assert!(img.pixels().any(|p| *p != BG));
    }
}
