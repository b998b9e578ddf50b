//! Debug annotations for panel textures
//!
//! In debug mode every rotated texture shows its rotation index in the middle
//! and, next to each side, which side of the base image ended up there.

use glam::Vec2;
use image::{Rgba, RgbaImage};

use crate::catalog::ShapeType;

/// Label glyph height in pixels
const FONT_SIZE_PX: f32 = 80.0;

/// Outline width in pixels
const STROKE_WIDTH_PX: f32 = 15.0;

const FILL: Rgba<u8> = Rgba([255, 255, 255, 255]);
const STROKE: Rgba<u8> = Rgba([0, 0, 0, 255]);

const GLYPH_COLUMNS: usize = 5;
const GLYPH_ROWS: usize = 7;

/// A piece of text centered on a canvas position
#[derive(Debug, Clone, PartialEq)]
pub struct DebugLabel {
    pub text: String,
    pub position: Vec2,
}

/// `R:<rotation>` centered on the canvas
pub fn rotation_label(rotation: usize, width: u32, height: u32) -> DebugLabel {
    DebugLabel {
        text: format!("R:{rotation}"),
        position: Vec2::new(width as f32 / 2.0, height as f32 / 2.0),
    }
}

/// One label per side slot `k`: the resolved side `(rotation + k) mod n`,
/// placed at the shape's label coordinate for slot `k`
pub fn side_labels(shape: ShapeType, rotation: usize, width: u32, height: u32) -> Vec<DebugLabel> {
    let descriptor = shape.descriptor();
    let sides = descriptor.side_count;
    descriptor
        .label_coordinates
        .iter()
        .enumerate()
        .map(|(k, &[u, v])| DebugLabel {
            text: ((rotation + k) % sides).to_string(),
            position: Vec2::new(width as f32 * u, height as f32 * v),
        })
        .collect()
}

/// Draw the rotation label and all side labels
pub fn draw_debug_info(canvas: &mut RgbaImage, shape: ShapeType, rotation: usize) {
    let (width, height) = canvas.dimensions();
    let mut labels = vec![rotation_label(rotation, width, height)];
    labels.extend(side_labels(shape, rotation, width, height));
    for label in &labels {
        draw_label(canvas, label);
    }
}

/// Outlined text centered on the label position
fn draw_label(canvas: &mut RgbaImage, label: &DebugLabel) {
    let cell = FONT_SIZE_PX / GLYPH_ROWS as f32;
    let advance = cell * (GLYPH_COLUMNS + 1) as f32;
    let glyph_count = label.text.chars().count() as f32;
    let text_width = advance * glyph_count - cell;
    let origin = label.position - Vec2::new(text_width / 2.0, FONT_SIZE_PX / 2.0);

    // Outline first so the fill of neighbouring glyphs stays on top
    for (color, grow) in [(STROKE, STROKE_WIDTH_PX / 2.0), (FILL, 0.0)] {
        for (i, c) in label.text.chars().enumerate() {
            let glyph_origin = origin + Vec2::new(advance * i as f32, 0.0);
            for (row, bits) in glyph(c).iter().enumerate() {
                for col in 0..GLYPH_COLUMNS {
                    if bits & (1 << (GLYPH_COLUMNS - 1 - col)) == 0 {
                        continue;
                    }
                    let min = glyph_origin + Vec2::new(col as f32, row as f32) * cell;
                    fill_rect(canvas, min - grow, min + Vec2::splat(cell + grow), color);
                }
            }
        }
    }
}

fn fill_rect(canvas: &mut RgbaImage, min: Vec2, max: Vec2, color: Rgba<u8>) {
    let x0 = min.x.round().max(0.0) as u32;
    let y0 = min.y.round().max(0.0) as u32;
    let x1 = (max.x.round().max(0.0) as u32).min(canvas.width());
    let y1 = (max.y.round().max(0.0) as u32).min(canvas.height());
    for y in y0..y1 {
        for x in x0..x1 {
            canvas.put_pixel(x, y, color);
        }
    }
}

/// 5x7 bitmap rows, most significant of the low 5 bits is the leftmost column
fn glyph(c: char) -> [u8; GLYPH_ROWS] {
    match c {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        _ => [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hexagon_side_labels_at_rotation_two() {
        let labels = side_labels(ShapeType::Hexagon, 2, 512, 512);
        assert_eq!(labels.len(), 6);

        // Slot 0 shows side (2 + 0) mod 6 at the slot 0 coordinate
        let coords = ShapeType::Hexagon.descriptor().label_coordinates[0];
        assert_eq!(labels[0].text, "2");
        let expected = Vec2::new(512.0 * coords[0], 512.0 * coords[1]);
        assert!((labels[0].position - expected).length() < 1e-3);

        let texts: Vec<&str> = labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["2", "3", "4", "5", "0", "1"]);
    }

    #[test]
    fn test_side_labels_scale_with_canvas() {
        let labels = side_labels(ShapeType::Pentagon, 0, 200, 100);
        let coords = ShapeType::Pentagon.descriptor().label_coordinates[1];
        assert!((labels[1].position.x - 200.0 * coords[0]).abs() < 1e-3);
        assert!((labels[1].position.y - 100.0 * coords[1]).abs() < 1e-3);
    }

    #[test]
    fn test_rotation_label_centered() {
        let label = rotation_label(4, 300, 200);
        assert_eq!(label.text, "R:4");
        assert_eq!(label.position, Vec2::new(150.0, 100.0));
    }

    #[test]
    fn test_draw_marks_label_positions() {
        let mut canvas = RgbaImage::new(512, 512);
        draw_debug_info(&mut canvas, ShapeType::Hexagon, 0);

        // Something opaque is drawn around the center label and each side slot
        for label in side_labels(ShapeType::Hexagon, 0, 512, 512)
            .iter()
            .chain(std::iter::once(&rotation_label(0, 512, 512)))
        {
            let x = label.position.x as i64;
            let y = label.position.y as i64;
            let drawn = (-20..=20).any(|dy| {
                (-20..=20).any(|dx| {
                    let (px, py) = ((x + dx) as u32, (y + dy) as u32);
                    canvas.get_pixel(px, py)[3] == 255
                })
            });
            assert!(drawn, "nothing drawn near {:?}", label);
        }
        // Far corner untouched
        assert_eq!(canvas.get_pixel(0, 0)[3], 0);
    }
}
