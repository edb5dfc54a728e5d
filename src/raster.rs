use egui::Pos2;
use image::{Rgba, RgbaImage};

use crate::brush::PaintColor;
use crate::geometry;

/// Thinnest pen the rasterizer will trace, so hairlines still hit pixel centres
const MIN_PEN_RADIUS: f32 = 0.5;

/// The backing pixel buffer strokes are replayed onto.
///
/// Pure render target: stroke geometry is never read back from it, and it is
/// thrown away whenever the surface changes size.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pixels: RgbaImage,
}

impl Default for Raster {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// True before the surface has been given a non-zero size
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<PaintColor> {
        self.pixels.get_pixel_checked(x, y).copied()
    }

    pub fn fill(&mut self, color: PaintColor) {
        for p in self.pixels.pixels_mut() {
            *p = color;
        }
    }

    /// Composite `image` over the raster with its top-left at the origin.
    /// Anything past the raster's edge is clipped.
    pub fn blit(&mut self, image: &RgbaImage) {
        let width = self.width().min(image.width());
        let height = self.height().min(image.height());
        for y in 0..height {
            for x in 0..width {
                let src = image.get_pixel(x, y).0;
                blend_over(self.pixels.get_pixel_mut(x, y), src);
            }
        }
    }

    /// Trace straight segments between consecutive points with a round pen.
    ///
    /// Coverage is the union of capsules around each segment, sampled at
    /// pixel centres. Each segment only scans its own padded box, and the
    /// union is collected in a mask so every covered pixel is blended once.
    pub fn draw_polyline(&mut self, points: &[Pos2], color: PaintColor, thickness: f32) {
        if points.len() < 2 || !thickness.is_finite() || color.0[3] == 0 {
            return;
        }

        let radius = (thickness / 2.0).max(MIN_PEN_RADIUS);
        let bounds = geometry::calculate_bounds(points, radius);
        let Some((min_x, min_y, max_x, max_y)) =
            geometry::pixel_span(bounds, self.width(), self.height())
        else {
            return;
        };

        let span_w = (max_x - min_x + 1) as usize;
        let span_h = (max_y - min_y + 1) as usize;
        let mut mask = vec![false; span_w * span_h];

        for seg in points.windows(2) {
            let (a, b) = (seg[0], seg[1]);
            let seg_bounds = geometry::calculate_bounds(&[a, b], radius);
            let Some((x0, y0, x1, y1)) =
                geometry::pixel_span(seg_bounds, self.width(), self.height())
            else {
                continue;
            };
            for y in y0..=y1 {
                let row = (y - min_y) as usize * span_w;
                for x in x0..=x1 {
                    let index = row + (x - min_x) as usize;
                    if mask[index] {
                        continue;
                    }
                    let centre = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                    if geometry::distance_to_line_segment(centre, a, b) <= radius {
                        mask[index] = true;
                    }
                }
            }
        }

        for (index, _) in mask.iter().enumerate().filter(|(_, covered)| **covered) {
            let x = min_x + (index % span_w) as u32;
            let y = min_y + (index / span_w) as u32;
            blend_over(self.pixels.get_pixel_mut(x, y), color.0);
        }
    }
}

/// Source-over in unmultiplied sRGB bytes
fn blend_over(dst: &mut Rgba<u8>, src: [u8; 4]) {
    let sa = src[3] as u32;
    if sa == 255 {
        *dst = Rgba(src);
        return;
    }
    if sa == 0 {
        return;
    }

    let da = dst.0[3] as u32;
    let inv = 255 - sa;
    // alpha scaled by 255
    let out_a = sa * 255 + da * inv;
    if out_a == 0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        let value = (src[c] as u32 * sa * 255 + dst.0[c] as u32 * da * inv + out_a / 2) / out_a;
        out[c] = value.min(255) as u8;
    }
    out[3] = ((out_a + 127) / 255).min(255) as u8;
    *dst = Rgba(out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::{BLACK, WHITE};
    use egui::pos2;
    use std::time::{Duration, Instant};

    #[test]
    fn test_fill() {
        let mut raster = Raster::new(4, 3);
        raster.fill(WHITE);
        assert!(raster.image().pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_horizontal_line_coverage() {
        let mut raster = Raster::new(20, 20);
        raster.fill(WHITE);
        raster.draw_polyline(&[pos2(2.0, 10.0), pos2(18.0, 10.0)], BLACK, 4.0);

        assert_eq!(raster.pixel(10, 10), Some(BLACK));
        assert_eq!(raster.pixel(10, 8), Some(BLACK));
        assert_eq!(raster.pixel(10, 13), Some(WHITE));
        assert_eq!(raster.pixel(10, 2), Some(WHITE));
    }

    #[test]
    fn test_single_point_draws_nothing() {
        let mut raster = Raster::new(10, 10);
        raster.fill(WHITE);
        let before = raster.clone();
        raster.draw_polyline(&[pos2(5.0, 5.0)], BLACK, 8.0);
        assert_eq!(raster, before);
    }

    #[test]
    fn test_offscreen_line_is_clipped() {
        let mut raster = Raster::new(10, 10);
        raster.fill(WHITE);
        let before = raster.clone();
        let offscreen = [pos2(-50.0, -50.0), pos2(-40.0, -40.0)];
        raster.draw_polyline(&offscreen, BLACK, 2.0);
        assert_eq!(raster, before);
    }

    #[test]
    fn test_translucent_joint_blends_once() {
        let mut raster = Raster::new(20, 20);
        raster.fill(WHITE);
        let color = Rgba([0, 0, 0, 128]);
        // the corner pixel sits inside both segments' capsules
        let corner = [pos2(2.0, 10.0), pos2(10.0, 10.0), pos2(10.0, 2.0)];
        raster.draw_polyline(&corner, color, 4.0);
        assert_eq!(raster.pixel(10, 10), raster.pixel(5, 10));
    }

    #[test]
    fn test_blit_clips_to_raster() {
        let mut raster = Raster::new(4, 4);
        raster.fill(WHITE);
        let image = RgbaImage::from_pixel(8, 2, Rgba([255, 0, 0, 255]));
        raster.blit(&image);
        assert_eq!(raster.pixel(3, 1), Some(Rgba([255, 0, 0, 255])));
        assert_eq!(raster.pixel(3, 2), Some(WHITE));
    }

    #[test]
    fn test_low_alpha_color_lands_unmultiplied() {
        let mut raster = Raster::new(8, 8);
        let color = Rgba([0x12, 0x34, 0x56, 0x10]);
        raster.draw_polyline(&[pos2(0.0, 4.0), pos2(8.0, 4.0)], color, 2.0);
        // source-over onto a fully transparent pixel keeps the source exactly
        assert_eq!(raster.pixel(4, 4), Some(color));
    }

    #[test]
    fn test_long_arc_stays_fast() {
        let mut raster = Raster::new(800, 600);
        raster.fill(WHITE);
        let points: Vec<Pos2> = (0..1500)
            .map(|i| {
                let angle = i as f32 / 1500.0 * std::f32::consts::TAU;
                pos2(400.0 + 280.0 * angle.cos(), 300.0 + 280.0 * angle.sin())
            })
            .collect();

        let start = Instant::now();
        raster.draw_polyline(&points, BLACK, 20.0);
        let elapsed = start.elapsed();

        assert!(elapsed < Duration::from_secs(2), "arc took {elapsed:?}");
        assert_eq!(raster.pixel(680, 300), Some(BLACK));
        assert_eq!(raster.pixel(400, 300), Some(WHITE));
    }

    #[test]
    fn test_blend_half_alpha_on_opaque() {
        let mut dst = Rgba([255, 255, 255, 255]);
        blend_over(&mut dst, [0, 0, 0, 128]);
        assert_eq!(dst.0[3], 255);
        assert!(dst.0[0] > 120 && dst.0[0] < 135);
    }
}
