//! Report generation module - rendering and export pipeline.
//!
//! This module handles:
//! - Building the report region markup from a payload (view)
//! - Rasterizing the region to a bitmap (raster)
//! - Splitting the bitmap across A4 pages (paginate)
//! - Assembling the paginated PDF (pdf)
//! - Writing PDF/JSON/PNG artifacts to disk (export)
//! - Console table output (table)
//!
//! Console formatting primitives are handled by the console module.
//!
//! # Module Organization
//!
//! - `view` - SVG report region builder (layout, labels, zebra tables)
//! - `raster` - Font loading and SVG-to-bitmap capture
//! - `paginate` - Page geometry: scaled height and per-page placements
//! - `pdf` - Paginated PDF assembly from one tall bitmap
//! - `export` - Artifact naming and file writing
//! - `table` - Console rendering of reports, lists, and the dashboard

mod export;
mod paginate;
mod pdf;
mod raster;
mod table;
mod view;

// Re-export view types
pub use view::{REGION_WIDTH, ReportRegion, build_report_region};

// Re-export raster types
pub use raster::{CAPTURE_SCALE, CapturedBitmap, RasterOptions, rasterize_region};

// Re-export pagination types
pub use paginate::{A4_PORTRAIT, PageLayout, PagePlacement, PageSize, layout_pages};

// Re-export PDF assembly
pub use pdf::render_pdf;

// Re-export export functions
pub use export::{artifact_file_name, write_artifacts};

// Re-export console rendering
pub use table::{print_components, print_dashboard, print_report};
