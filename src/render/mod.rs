//! PNG rendering of assembled series with plotters.
//!
//! ## Submodules
//!
//! - [`chart`]: Axis layout, series drawing and legend
//! - [`theme`]: Colors and stroke widths
//! - `backend`: Drawing backend wrapper that falls back to the bitmap font
//! - `glyphs`: Built-in 5x7 bitmap font
//!
//! ## Chart Layout
//!
//! ```text
//! ┌───────────────── GC Log (Java <version>) ─────────────────┐
//! │ MB                                                        │
//! │  │   ▌ capacity bars     │ before→after segments          │
//! │  │   ▌                   ▲ full GC markers                │
//! │  │ ┃ process start lines                                  │
//! │  └──────────────────────────────────────────────── time   │
//! │                     [ legend ]                            │
//! └───────────────────────────────────────────────────────────┘
//! ```

mod backend;
pub mod chart;
mod glyphs;
pub mod theme;

pub use chart::draw_chart;
pub use theme::Theme;

use crate::data::HeapMode;

/// Image size and heap display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub heap_mode: HeapMode,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 800,
            heap_mode: HeapMode::Change,
        }
    }
}
