use std::io::Cursor;
use std::path::PathBuf;

use ab_glyph::FontArc;
use egui::vec2;
use image::{ImageFormat, RgbaImage};

use crate::config::SketchConfig;
use crate::error::{SketchError, SketchResult};
use crate::state::SketchContext;
use crate::surface::{RasterSurface, Surface};

/// What sits under the strokes in an exported image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportBackground {
    #[default]
    Transparent,
    /// Fill with the current tool color
    ToolColor,
}

impl ExportBackground {
    pub fn label(&self) -> &'static str {
        match self {
            ExportBackground::Transparent => "Transparent",
            ExportBackground::ToolColor => "Tool color",
        }
    }
}

/// egui's bundled monospace fallback chain. Exported stamps use the same outlines
/// the canvas shows and was measured with.
const EMBEDDED_FONTS: [&str; 3] = ["Hack", "NotoEmoji-Regular", "emoji-icon-font"];

/// Load the fonts egui ships with `default_fonts`, in fallback order.
pub fn embedded_fonts() -> SketchResult<Vec<FontArc>> {
    let definitions = egui::FontDefinitions::default();
    EMBEDDED_FONTS
        .iter()
        .filter_map(|name| definitions.font_data.get(*name))
        .map(|data| FontArc::try_from_vec(data.font.to_vec()).map_err(SketchError::from))
        .collect()
}

/// Load the configured override font, if any.
pub fn load_export_font(config: &SketchConfig) -> SketchResult<Option<FontArc>> {
    let Some(path) = &config.export_font else {
        return Ok(None);
    };
    let bytes = std::fs::read(path)?;
    let font = FontArc::try_from_vec(bytes)?;
    log::debug!("Loaded export font {}", path.display());
    Ok(Some(font))
}

/// Rasterise the committed history at the configured export size.
///
/// The in-flight action and the preview cursor are not part of the export.
pub fn render_export(sketch: &SketchContext, background: ExportBackground) -> SketchResult<RgbaImage> {
    let config = sketch.config();
    let scale = vec2(
        config.export_width as f32 / config.canvas_width as f32,
        config.export_height as f32 / config.canvas_height as f32,
    );

    let mut surface = RasterSurface::new(config.export_width, config.export_height).with_scale(scale);
    if background == ExportBackground::ToolColor {
        surface = surface.with_background(sketch.tools().color());
    }
    // A configured font goes first; egui's fonts cover whatever it lacks.
    if let Some(font) = load_export_font(config)? {
        surface = surface.with_font(font);
    }
    surface = surface.with_fonts(embedded_fonts()?);

    surface.clear();
    sketch.render_committed(&mut surface);

    if surface.skipped_glyphs() > 0 {
        log::warn!(
            "{} stamp(s) left out of the export: no font available",
            surface.skipped_glyphs()
        );
    }
    Ok(surface.into_image())
}

pub fn encode_png(image: &RgbaImage) -> SketchResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Write the PNG into `export_dir` and return the path written.
#[cfg(not(target_arch = "wasm32"))]
pub fn save_png(bytes: &[u8], config: &SketchConfig) -> SketchResult<PathBuf> {
    let path = config.export_dir.join(config.export_file_name());
    std::fs::write(&path, bytes)?;
    log::info!("Exported {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}

/// Hand the PNG to the browser as a download and return the suggested file name.
#[cfg(target_arch = "wasm32")]
pub fn save_png(bytes: &[u8], config: &SketchConfig) -> SketchResult<PathBuf> {
    use eframe::wasm_bindgen::{JsCast as _, JsValue};

    fn js_error(err: JsValue) -> SketchError {
        SketchError::Export(format!("{err:?}"))
    }

    let file_name = config.export_file_name();

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(js_error)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| SketchError::Export("no document to attach the download to".to_owned()))?;
    let anchor = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| SketchError::Export("created element is not an anchor".to_owned()))?;
    anchor.set_href(&url);
    anchor.set_download(&file_name);
    anchor.click();

    web_sys::Url::revoke_object_url(&url).map_err(js_error)?;
    log::info!("Offered {} ({} bytes) for download", file_name, bytes.len());
    Ok(PathBuf::from(file_name))
}

/// Render, encode and save in one go.
pub fn export_png(sketch: &SketchContext, background: ExportBackground) -> SketchResult<PathBuf> {
    let image = render_export(sketch, background)?;
    let bytes = encode_png(&image)?;
    save_png(&bytes, sketch.config())
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, pos2};
    use image::Rgba;

    use ab_glyph::Font as _;

    use crate::tools::ToolKind;

    fn sketch_with_line() -> SketchContext {
        let mut sketch = SketchContext::new(SketchConfig::default()).unwrap();
        sketch.pointer_down(pos2(100.0, 100.0));
        sketch.pointer_move(pos2(200.0, 100.0));
        sketch.pointer_up(pos2(200.0, 100.0));
        sketch
    }

    #[test]
    fn test_export_is_scaled_to_export_size() {
        let sketch = sketch_with_line();
        let image = render_export(&sketch, ExportBackground::Transparent).unwrap();

        assert_eq!(image.dimensions(), (1024, 1024));
        // 150 * 1024/500 = 307.2, 100 * 1024/500 = 204.8
        assert_eq!(*image.get_pixel(307, 205), Rgba([0, 0, 0, 255]));
        assert_eq!(image.get_pixel(10, 10).0[3], 0);
    }

    #[test]
    fn test_export_background_uses_tool_color() {
        let mut sketch = sketch_with_line();
        sketch.set_color("#00ff00").unwrap();
        let image = render_export(&sketch, ExportBackground::ToolColor).unwrap();

        assert_eq!(*image.get_pixel(10, 10), Rgba([0, 255, 0, 255]));
        // The committed stroke keeps its own color on top of the background.
        assert_eq!(*image.get_pixel(307, 205), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_export_leaves_out_gesture_in_progress() {
        let mut sketch = SketchContext::new(SketchConfig::default()).unwrap();
        sketch.set_color32(Color32::RED);
        sketch.pointer_down(pos2(100.0, 100.0));
        sketch.pointer_move(pos2(200.0, 100.0));

        let image = render_export(&sketch, ExportBackground::Transparent).unwrap();
        assert!(image.pixels().all(|p| p.0[3] == 0));
    }

    fn painted_pixels(image: &RgbaImage) -> usize {
        image.pixels().filter(|p| p.0[3] > 0).count()
    }

    #[test]
    fn test_stamps_are_exported_with_bundled_fonts() {
        let mut sketch = SketchContext::new(SketchConfig::default()).unwrap();
        sketch.set_thickness(10.0).unwrap();
        sketch.switch_mode(ToolKind::Stamp);
        sketch.pointer_down(pos2(250.0, 250.0));
        sketch.pointer_up(pos2(250.0, 250.0));
        assert_eq!(sketch.history().committed().len(), 1);

        let image = render_export(&sketch, ExportBackground::Transparent).unwrap();
        assert!(painted_pixels(&image) > 0);
        // The 70px die lands around the center of the export, not in a corner.
        assert_eq!(image.get_pixel(5, 5).0[3], 0);
    }

    #[test]
    fn test_ascii_stamp_is_exported() {
        let mut sketch = SketchContext::new(SketchConfig::default()).unwrap();
        sketch.set_thickness(10.0).unwrap();
        sketch.select_stamp("A").unwrap();
        sketch.pointer_down(pos2(100.0, 100.0));
        sketch.pointer_up(pos2(100.0, 100.0));

        let image = render_export(&sketch, ExportBackground::Transparent).unwrap();
        assert!(painted_pixels(&image) > 0);
    }

    #[test]
    fn test_bundled_fonts_cover_emoji_and_ascii() {
        let fonts = embedded_fonts().unwrap();
        assert!(fonts.len() >= 2);
        assert!(fonts[0].glyph_id('A').0 != 0);
        assert!(fonts.iter().any(|font| font.glyph_id('🎲').0 != 0));
    }

    #[test]
    fn test_missing_font_file_is_an_error() {
        let config = SketchConfig {
            export_font: Some(PathBuf::from("/nonexistent/font.ttf")),
            ..SketchConfig::default()
        };
        let sketch = SketchContext::new(config).unwrap();
        assert!(matches!(
            render_export(&sketch, ExportBackground::Transparent),
            Err(SketchError::Io(_))
        ));
    }

    #[test]
    fn test_png_encoding_and_save() {
        let dir = std::env::temp_dir().join(format!("sketchpad-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let config = SketchConfig {
            export_dir: dir.clone(),
            ..SketchConfig::default()
        };
        let mut sketch = SketchContext::new(config).unwrap();
        sketch.pointer_down(pos2(0.0, 0.0));
        sketch.pointer_move(pos2(10.0, 10.0));
        sketch.pointer_up(pos2(10.0, 10.0));

        let path = export_png(&sketch, ExportBackground::Transparent).unwrap();
        assert_eq!(path, dir.join("sketchpad_1024x1024.png"));

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (1024, 1024));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
