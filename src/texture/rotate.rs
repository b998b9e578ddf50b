//! Rotation and compositing of panel bitmaps
//!
//! Rotations follow the 2D canvas convention (y axis down): rotation `r` of an
//! `n`-sided panel turns the image by `-r * 360/n` degrees about its center,
//! which matches the UV unwrapping of the mesh.

use glam::{Affine2, Vec2};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::f32::consts::TAU;

/// Rotation angle in radians for rotation index `rotation` of an `n`-sided shape
pub fn rotation_angle(rotation: usize, side_count: usize) -> f32 {
    -(rotation as f32) * TAU / side_count as f32
}

/// Pixel-space rotation about the center of a `width` x `height` canvas
#[derive(Debug, Clone, Copy)]
pub struct RotationTransform {
    forward: Affine2,
    inverse: Affine2,
}

impl RotationTransform {
    pub fn new(rotation: usize, side_count: usize, width: u32, height: u32) -> Self {
        let center = Vec2::new(width as f32 / 2.0, height as f32 / 2.0);
        let forward = Affine2::from_translation(center)
            * Affine2::from_angle(rotation_angle(rotation, side_count))
            * Affine2::from_translation(-center);
        Self {
            forward,
            inverse: forward.inverse(),
        }
    }

    /// Where a point of the base image lands on the rotated canvas
    pub fn apply(&self, point: Vec2) -> Vec2 {
        self.forward.transform_point2(point)
    }

    /// Where a point of the rotated canvas comes from in the base image
    pub fn invert(&self, point: Vec2) -> Vec2 {
        self.inverse.transform_point2(point)
    }
}

/// Render `base` rotated by rotation index `rotation` onto a same-sized canvas
///
/// Canvas pixels that map outside the base image stay transparent.
pub fn rotate_about_center(base: &RgbaImage, rotation: usize, side_count: usize) -> RgbaImage {
    if rotation % side_count == 0 {
        return base.clone();
    }

    let (width, height) = base.dimensions();
    let transform = RotationTransform::new(rotation, side_count, width, height);

    let mut canvas = RgbaImage::new(width, height);
    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        // Sample at pixel centers
        let source = transform.invert(Vec2::new(x as f32 + 0.5, y as f32 + 0.5));
        *pixel = sample_bilinear(base, source - Vec2::splat(0.5));
    }
    canvas
}

/// Bilinear sample with premultiplied alpha; outside the image is transparent
fn sample_bilinear(image: &RgbaImage, at: Vec2) -> Rgba<u8> {
    let x0 = at.x.floor();
    let y0 = at.y.floor();
    let fx = at.x - x0;
    let fy = at.y - y0;

    let fetch = |x: f32, y: f32| -> [f32; 4] {
        if x < 0.0 || y < 0.0 || x >= image.width() as f32 || y >= image.height() as f32 {
            return [0.0; 4];
        }
        let p = image.get_pixel(x as u32, y as u32).0;
        let a = p[3] as f32 / 255.0;
        [p[0] as f32 * a, p[1] as f32 * a, p[2] as f32 * a, p[3] as f32]
    };

    let taps = [
        (fetch(x0, y0), (1.0 - fx) * (1.0 - fy)),
        (fetch(x0 + 1.0, y0), fx * (1.0 - fy)),
        (fetch(x0, y0 + 1.0), (1.0 - fx) * fy),
        (fetch(x0 + 1.0, y0 + 1.0), fx * fy),
    ];

    let mut sum = [0.0f32; 4];
    for (texel, weight) in taps {
        for (acc, value) in sum.iter_mut().zip(texel) {
            *acc += value * weight;
        }
    }

    let alpha = sum[3];
    if alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let unpremultiply = 255.0 / alpha;
    Rgba([
        (sum[0] * unpremultiply).round().clamp(0.0, 255.0) as u8,
        (sum[1] * unpremultiply).round().clamp(0.0, 255.0) as u8,
        (sum[2] * unpremultiply).round().clamp(0.0, 255.0) as u8,
        alpha.round().clamp(0.0, 255.0) as u8,
    ])
}

/// Alpha-composite `overlay` over the whole canvas, stretched to the canvas size
pub fn composite_overlay(canvas: &mut RgbaImage, overlay: &RgbaImage) {
    if overlay.dimensions() == canvas.dimensions() {
        imageops::overlay(canvas, overlay, 0, 0);
    } else {
        let (width, height) = canvas.dimensions();
        let resized = imageops::resize(overlay, width, height, FilterType::Triangle);
        imageops::overlay(canvas, &resized, 0, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn quadrant_image(size: u32) -> RgbaImage {
        RgbaImage::from_fn(size, size, |x, y| {
            if x < size / 2 && y < size / 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        })
    }

    #[test]
    fn test_rotation_zero_is_identity() {
        let base = quadrant_image(16);
        assert_eq!(rotate_about_center(&base, 0, 6), base);
    }

    #[test]
    fn test_angle_is_clockwise_negative() {
        assert!((rotation_angle(1, 6) + TAU / 6.0).abs() < 1e-6);
        assert!((rotation_angle(2, 5) + 2.0 * TAU / 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_invert_finds_source_pixel() {
        // Quarter turn in canvas space: top-left corner lands bottom-left
        let transform = RotationTransform::new(1, 4, 16, 16);
        let landed = transform.apply(Vec2::new(0.0, 0.0));
        assert!(landed.distance(Vec2::new(0.0, 16.0)) < 1e-4);
        assert!(transform.invert(Vec2::new(0.0, 16.0)).distance(Vec2::ZERO) < 1e-4);
    }

    #[test]
    fn test_quarter_turn_moves_top_left_quadrant() {
        // A 4-sided rotation by index 1 is -90 degrees in canvas space (y down),
        // so the top-left quadrant ends up bottom-left.
        let rotated = rotate_about_center(&quadrant_image(16), 1, 4);
        assert_eq!(rotated.get_pixel(3, 12), &Rgba([255, 0, 0, 255]));
        assert_eq!(rotated.get_pixel(3, 3), &Rgba([0, 0, 255, 255]));
        assert_eq!(rotated.get_pixel(12, 3), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_rotated_corners_become_transparent() {
        let base = RgbaImage::from_pixel(32, 32, Rgba([10, 200, 30, 255]));
        let rotated = rotate_about_center(&base, 1, 6);
        assert_eq!(rotated.get_pixel(0, 0)[3], 0);
        assert_eq!(rotated.get_pixel(16, 16), &Rgba([10, 200, 30, 255]));
    }

    #[test]
    fn test_composite_overlay_stretches() {
        let mut canvas = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
        let mut stitch = RgbaImage::new(4, 4);
        stitch.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
        stitch.put_pixel(1, 0, Rgba([255, 255, 255, 255]));
        stitch.put_pixel(0, 1, Rgba([255, 255, 255, 255]));
        stitch.put_pixel(1, 1, Rgba([255, 255, 255, 255]));

        composite_overlay(&mut canvas, &stitch);
        assert_eq!(canvas.get_pixel(1, 1), &Rgba([255, 255, 255, 255]));
        assert_eq!(canvas.get_pixel(7, 7), &Rgba([0, 0, 0, 255]));
    }

    proptest! {
        #[test]
        fn rotation_round_trip_is_identity(
            hexagon in any::<bool>(),
            rotation in 0usize..6,
            x in 0.0f32..512.0,
            y in 0.0f32..512.0,
        ) {
            let sides = if hexagon { 6 } else { 5 };
            let rotation = rotation % sides;
            let first = RotationTransform::new(rotation, sides, 512, 512);
            let second = RotationTransform::new((sides - rotation) % sides, sides, 512, 512);

            let point = Vec2::new(x, y);
            let round_trip = second.apply(first.apply(point));
            prop_assert!(round_trip.distance(point) < 1e-2);
        }

        #[test]
        fn invert_undoes_apply(rotation in 0usize..5, x in 0.0f32..256.0, y in 0.0f32..128.0) {
            let transform = RotationTransform::new(rotation, 5, 256, 128);
            let point = Vec2::new(x, y);
            prop_assert!(transform.invert(transform.apply(point)).distance(point) < 1e-2);
        }
    }
}
