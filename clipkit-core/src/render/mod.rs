// ============================================================================
// clipkit-core/src/render/mod.rs
// ============================================================================
//
// RENDERING: Drawing primitives for generated and annotated frames
//
// KEY COMPONENTS:
// - color: colour triple parsing and the progress bar colour ramp
// - draw: rectangles and coverage-mask blending
// - text: TextPainter seam and the fontdue-backed implementation

pub mod color;
pub mod draw;
pub mod text;

pub use color::{BLACK, ColorOrder, WHITE, lerp_progress_color, parse_color};
pub use draw::fill_rect;
pub use text::{FontTextPainter, TextExtent, TextMask, TextPainter, load_font};
