//! Report region rasterization.
//!
//! Turns the SVG region from `view` into an oversampled bitmap. The
//! capture always happens over an opaque white fill, so exports look the
//! same regardless of any on-screen theme, and every pixel ends up fully
//! opaque.

use crate::error::ExportError;
use crate::report::view::ReportRegion;
use log::debug;
use resvg::tiny_skia;
use resvg::usvg::{fontdb, Options, Tree};
use std::path::PathBuf;
use std::sync::Arc;

/// Default oversampling factor. Doubling the pixel density keeps text
/// crisp once the capture is scaled down onto a PDF page.
pub const CAPTURE_SCALE: f32 = 2.0;

/// Knobs for the capture stage.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    pub scale: f32,
    /// Extra font directory loaded on top of the system fonts.
    pub fonts_dir: Option<PathBuf>,
    pub font_family: String,
}

impl Default for RasterOptions {
    fn default() -> Self {
        RasterOptions { scale: CAPTURE_SCALE, fonts_dir: None, font_family: "DejaVu Sans".to_string() }
    }
}

/// An oversampled, fully opaque capture of the report region.
pub struct CapturedBitmap {
    pixmap: tiny_skia::Pixmap,
}

impl CapturedBitmap {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Raw RGB8 pixel data. The white background fill makes every pixel
    /// opaque, so premultiplied RGBA collapses to plain RGB by dropping
    /// the alpha byte.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixmap.data().chunks_exact(4).flat_map(|px| [px[0], px[1], px[2]]).collect()
    }

    /// Encode the capture as a PNG byte stream.
    pub fn encode_png(&self) -> Result<Vec<u8>, ExportError> {
        self.pixmap.encode_png().map_err(|e| ExportError::Png(e.to_string()))
    }
}

/// Rasterize a report region at `options.scale` times its layout size.
pub fn rasterize_region(region: &ReportRegion, options: &RasterOptions) -> Result<CapturedBitmap, ExportError> {
    // Fonts: system faces first, then the extra directory if given
    let mut fontdb = fontdb::Database::new();
    fontdb.load_system_fonts();
    if let Some(dir) = &options.fonts_dir {
        fontdb.load_fonts_dir(dir);
    }
    debug!("loaded {} font faces for the report capture", fontdb.len());

    let mut svg_options = Options::default();
    svg_options.font_family = options.font_family.clone();
    svg_options.fontdb = Arc::new(fontdb);

    let tree = Tree::from_str(&region.markup, &svg_options)?;

    let size = tree.size();
    let width = (size.width() * options.scale).round() as u32;
    let height = (size.height() * options.scale).round() as u32;
    if width == 0 || height == 0 {
        return Err(ExportError::EmptyRegion { width, height });
    }
    debug!("capturing {:.0}x{:.0} region at {}x -> {}x{} px", size.width(), size.height(), options.scale, width, height);

    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(ExportError::Surface { width, height })?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(options.scale, options.scale),
        &mut pixmap.as_mut(),
    );

    Ok(CapturedBitmap { pixmap })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(width: f32, height: f32) -> ReportRegion {
        ReportRegion {
            markup: format!(
                r##"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg"><rect x="10" y="10" width="20" height="20" fill="#336699"/></svg>"##,
                w = width,
                h = height,
            ),
            width,
            height,
        }
    }

    #[test]
    fn test_capture_doubles_the_region_dimensions() {
        let bitmap = rasterize_region(&region(100.0, 50.0), &RasterOptions::default()).unwrap();

        assert_eq!(bitmap.width(), 200);
        assert_eq!(bitmap.height(), 100);
    }

    #[test]
    fn test_capture_scale_is_configurable() {
        let options = RasterOptions { scale: 1.0, ..RasterOptions::default() };
        let bitmap = rasterize_region(&region(100.0, 50.0), &options).unwrap();

        assert_eq!(bitmap.width(), 100);
        assert_eq!(bitmap.height(), 50);
    }

    #[test]
    fn test_background_is_opaque_white() {
        let bitmap = rasterize_region(&region(100.0, 50.0), &RasterOptions::default()).unwrap();
        let rgb = bitmap.to_rgb8();

        assert_eq!(rgb.len(), 200 * 100 * 3);
        // Top-left corner is untouched by the rectangle
        assert_eq!(&rgb[..3], &[255, 255, 255]);
    }

    #[test]
    fn test_vanishing_scale_is_rejected() {
        let options = RasterOptions { scale: 0.001, ..RasterOptions::default() };

        assert!(matches!(
            rasterize_region(&region(100.0, 50.0), &options),
            Err(ExportError::EmptyRegion { .. })
        ));
    }

    #[test]
    fn test_png_encoding_carries_the_signature() {
        let bitmap = rasterize_region(&region(40.0, 40.0), &RasterOptions::default()).unwrap();
        let png = bitmap.encode_png().unwrap();

        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }

    #[test]
    fn test_invalid_markup_is_rejected() {
        let bad = ReportRegion { markup: "<svg".to_string(), width: 10.0, height: 10.0 };

        assert!(matches!(
            rasterize_region(&bad, &RasterOptions::default()),
            Err(ExportError::Svg(_))
        ));
    }
}
