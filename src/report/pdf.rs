//! PDF assembly from a captured report bitmap.
//!
//! Applies a [`PageLayout`] to an actual document: every page embeds the
//! same capture, scaled to span the page width and shifted up by one page
//! height per page index, so consecutive pages show consecutive slices.

use crate::error::ExportError;
use crate::report::paginate::PageLayout;
use crate::report::raster::CapturedBitmap;
use log::debug;
use printpdf::{ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfDocument, Px};

const MM_PER_INCH: f64 = 25.4;

/// printpdf wants f32 millimetres; geometry stays f64 until this point.
fn mm(value: f64) -> Mm {
    Mm(value as f32)
}

/// Assemble the paginated PDF and serialize it to bytes.
pub fn render_pdf(title: &str, bitmap: &CapturedBitmap, layout: &PageLayout) -> Result<Vec<u8>, ExportError> {
    let page_width = mm(layout.page.width_mm);
    let page_height = mm(layout.page.height_mm);

    let (doc, first_page, first_layer) = PdfDocument::new(title, page_width, page_height, "Rapor");

    // The capture spans the full page width; the DPI encodes that scale
    let dpi = f64::from(bitmap.width()) * MM_PER_INCH / layout.page.width_mm;
    let rgb = bitmap.to_rgb8();
    debug!("tiling {}x{} px capture across {} page(s) at {:.1} dpi", bitmap.width(), bitmap.height(), layout.page_count(), dpi);

    for placement in &layout.placements {
        let (page_index, layer_index) = if placement.page_index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(page_width, page_height, "Rapor")
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        let xobject = ImageXObject {
            width: Px(bitmap.width() as usize),
            height: Px(bitmap.height() as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: rgb.clone(),
            image_filter: None,
            smask: None,
            clipping_bbox: None,
        };

        // Bottom-left origin: the image bottom sits page_height below its
        // top-origin offset plus the full scaled height
        let translate_y = layout.page.height_mm - layout.scaled_height_mm - placement.image_top_mm;

        Image::from(xobject).add_to_layer(
            layer,
            ImageTransform {
                translate_x: Some(mm(0.0)),
                translate_y: Some(mm(translate_y)),
                dpi: Some(dpi as f32),
                ..Default::default()
            },
        );
    }

    doc.save_to_bytes().map_err(|e| ExportError::Pdf(e.to_string()))
}
