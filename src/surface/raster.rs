use ab_glyph::{Font as _, FontArc, PxScale, ScaleFont as _};
use egui::{Color32, Vec2, vec2};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_text_mut};

use super::{GlyphMetrics, MonospaceMetrics, Surface};
use crate::geometry::{Point, Segment};

/// Software surface over an RGBA pixel buffer, used for PNG export.
///
/// Surface-local coordinates are multiplied by `scale` before rasterising, so a
/// 500x500 sketch can be painted straight into a 1024x1024 buffer without a
/// resampling pass. Glyphs are drawn with the first font that covers every char,
/// in the order fonts were added. With no fonts at all they are skipped and counted
/// in [`RasterSurface::skipped_glyphs`].
pub struct RasterSurface {
    image: RgbaImage,
    scale: Vec2,
    background: Option<Color32>,
    fonts: Vec<FontArc>,
    skipped_glyphs: usize,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width.max(1), height.max(1)),
            scale: Vec2::splat(1.0),
            background: None,
            fonts: Vec::new(),
            skipped_glyphs: 0,
        }
    }

    /// Factor from surface-local units to pixels.
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Color used by `clear`. Without one the buffer is washed to transparent.
    pub fn with_background(mut self, color: Color32) -> Self {
        self.background = Some(color);
        self
    }

    /// Add a font to the fallback chain.
    pub fn with_font(mut self, font: FontArc) -> Self {
        self.fonts.push(font);
        self
    }

    pub fn with_fonts(mut self, fonts: impl IntoIterator<Item = FontArc>) -> Self {
        self.fonts.extend(fonts);
        self
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn skipped_glyphs(&self) -> usize {
        self.skipped_glyphs
    }

    fn to_pixels(&self, point: Point) -> Point {
        Point::new(point.x * self.scale.x, point.y * self.scale.y)
    }

    // glyph id 0 is .notdef
    fn font_for(&self, glyph: &str) -> Option<&FontArc> {
        self.fonts
            .iter()
            .find(|font| glyph.chars().all(|c| font.glyph_id(c).0 != 0))
            .or_else(|| self.fonts.first())
    }
}

fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba(color.to_srgba_unmultiplied())
}

impl GlyphMetrics for RasterSurface {
    fn measure_glyph(&self, glyph: &str, font_px: f32) -> Vec2 {
        let Some(font) = self.font_for(glyph) else {
            return MonospaceMetrics.measure_glyph(glyph, font_px);
        };

        let scaled = font.as_scaled(PxScale::from(font_px));
        let width: f32 = glyph
            .chars()
            .map(|c| scaled.h_advance(font.glyph_id(c)))
            .sum();
        // descent is negative below the baseline
        vec2(width, scaled.ascent() - scaled.descent())
    }
}

impl Surface for RasterSurface {
    fn clear(&mut self) {
        let fill = self.background.map(to_rgba).unwrap_or(Rgba([0, 0, 0, 0]));
        for pixel in self.image.pixels_mut() {
            *pixel = fill;
        }
        self.skipped_glyphs = 0;
    }

    fn draw_segment(&mut self, segment: &Segment, color: Color32, thickness: f32) {
        let start = self.to_pixels(segment.start);
        let end = self.to_pixels(segment.end);
        let radius = (thickness * (self.scale.x + self.scale.y) / 4.0).max(0.5);
        let rgba = to_rgba(color);

        if segment.is_degenerate() {
            draw_filled_circle_mut(
                &mut self.image,
                (start.x.round() as i32, start.y.round() as i32),
                radius.round() as i32,
                rgba,
            );
            return;
        }

        // Stamp discs along the segment; spacing below the radius keeps edges smooth
        // and gives round caps and joins for free.
        let spacing = (radius * 0.5).max(0.5);
        let steps = ((end - start).length() / spacing).ceil().max(1.0) as u32;
        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let center = start.lerp(end, t);
            draw_filled_circle_mut(
                &mut self.image,
                (center.x.round() as i32, center.y.round() as i32),
                radius.round() as i32,
                rgba,
            );
        }
    }

    fn draw_glyph(&mut self, glyph: &str, origin: Point, font_px: f32, color: Color32) {
        let Some(font) = self.font_for(glyph).cloned() else {
            self.skipped_glyphs += 1;
            return;
        };

        let origin = self.to_pixels(origin);
        let scale = PxScale {
            x: font_px * self.scale.x,
            y: font_px * self.scale.y,
        };
        draw_text_mut(
            &mut self.image,
            to_rgba(color),
            origin.x.round() as i32,
            origin.y.round() as i32,
            scale,
            &font,
            glyph,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_clear_to_background() {
        let mut surface = RasterSurface::new(4, 4).with_background(Color32::from_rgb(10, 20, 30));
        surface.clear();
        assert!(surface.image().pixels().all(|p| *p == Rgba([10, 20, 30, 255])));
    }

    #[test]
    fn test_clear_transparent() {
        let mut surface = RasterSurface::new(4, 4);
        surface.draw_segment(&Segment::new(pos2(0.0, 0.0), pos2(3.0, 3.0)), Color32::RED, 2.0);
        surface.clear();
        assert!(surface.image().pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn test_segment_is_scaled() {
        let mut surface = RasterSurface::new(40, 40).with_scale(Vec2::splat(2.0));
        surface.clear();
        surface.draw_segment(&Segment::new(pos2(2.0, 10.0), pos2(18.0, 10.0)), Color32::RED, 2.0);

        let image = surface.image();
        // Both endpoints land at twice their surface-local coordinates.
        assert_eq!(*image.get_pixel(4, 20), Rgba([255, 0, 0, 255]));
        assert_eq!(*image.get_pixel(36, 20), Rgba([255, 0, 0, 255]));
        assert_eq!(image.get_pixel(20, 2).0[3], 0);
    }

    #[test]
    fn test_glyph_without_font_is_skipped() {
        let mut surface = RasterSurface::new(8, 8);
        surface.clear();
        surface.draw_glyph("🚀", pos2(0.0, 0.0), 7.0, Color32::BLACK);
        assert_eq!(surface.skipped_glyphs(), 1);
        assert!(surface.image().pixels().all(|p| p.0[3] == 0));

        // Falls back to monospace metrics for centering.
        assert_eq!(surface.measure_glyph("🚀", 7.0), vec2(7.0, 7.0));
    }

    #[test]
    fn test_degenerate_segment_is_a_dot() {
        let mut surface = RasterSurface::new(20, 20);
        surface.clear();
        surface.draw_segment(&Segment::new(pos2(10.0, 10.0), pos2(10.0, 10.0)), Color32::RED, 4.0);
        assert_eq!(*surface.image().get_pixel(10, 10), Rgba([255, 0, 0, 255]));
        assert_eq!(surface.image().get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn test_glyph_falls_back_through_fonts() {
        let fonts = crate::export::embedded_fonts().unwrap();
        let mut surface = RasterSurface::new(64, 64).with_fonts(fonts);
        surface.clear();
        surface.draw_glyph("🚀", pos2(8.0, 8.0), 40.0, Color32::BLACK);
        surface.draw_glyph("x", pos2(0.0, 0.0), 12.0, Color32::BLACK);

        assert_eq!(surface.skipped_glyphs(), 0);
        assert!(surface.image().pixels().any(|p| p.0[3] > 0));
        // Real outlines, not the monospace estimate.
        assert!(surface.measure_glyph("x", 12.0).x < 12.0);
    }
}
