//! Page-tiling geometry for the PDF exporter.
//!
//! Pagination is split in two stages: this module computes where the
//! captured image lands on each page, and `pdf` applies those placements
//! to an actual document. Keeping the geometry pure makes the page count
//! and offsets testable without rendering anything.

use crate::error::ExportError;

/// A page size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

/// Fixed page size for exported documents. The 295 mm height is not the
/// 297 mm of true A4; it matches the documents the platform has always
/// produced, so regenerated reports tile exactly like previously shared
/// ones. Changing it would shift every page boundary.
pub const A4_PORTRAIT: PageSize = PageSize { width_mm: 210.0, height_mm: 295.0 };

/// Where the capture sits on one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePlacement {
    pub page_index: usize,
    /// Offset of the image's top edge from the page's top edge, in mm.
    /// Zero on the first page, then -H, -2H and so on, sliding the image
    /// up so the next slice shows through.
    pub image_top_mm: f64,
}

/// Full tiling plan for one capture.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub page: PageSize,
    /// Height of the capture once scaled to span the page width, in mm.
    pub scaled_height_mm: f64,
    pub placements: Vec<PagePlacement>,
}

impl PageLayout {
    pub fn page_count(&self) -> usize {
        self.placements.len()
    }
}

/// Float remainders below this count as zero, so content that is an exact
/// multiple of the page height does not grow a trailing blank page.
const REMAINDER_EPS: f64 = 1e-6;

/// Plan how a capture tiles across fixed-size pages.
///
/// The capture is scaled uniformly to span the full page width; whatever
/// height that produces is cut into page-height slices. There is always at
/// least one page, and a further page is added only while strictly more
/// than [`REMAINDER_EPS`] of content height remains.
pub fn layout_pages(bitmap_width_px: u32, bitmap_height_px: u32, page: PageSize) -> Result<PageLayout, ExportError> {
    if bitmap_width_px == 0 || bitmap_height_px == 0 {
        return Err(ExportError::EmptyRegion { width: bitmap_width_px, height: bitmap_height_px });
    }

    let scaled_height_mm = f64::from(bitmap_height_px) * page.width_mm / f64::from(bitmap_width_px);

    let mut placements = vec![PagePlacement { page_index: 0, image_top_mm: 0.0 }];
    let mut remaining = scaled_height_mm - page.height_mm;
    while remaining > REMAINDER_EPS {
        let page_index = placements.len();
        placements.push(PagePlacement {
            page_index,
            image_top_mm: -(page_index as f64) * page.height_mm,
        });
        remaining -= page.height_mm;
    }

    Ok(PageLayout { page, scaled_height_mm, placements })
}
