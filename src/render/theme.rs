//! Colors and stroke widths for the chart.

use plotters::style::{Color, RGBAColor, RGBColor, ShapeStyle, BLACK, WHITE};

use crate::data::CollectionKind;

/// Palette for one chart.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: RGBColor,
    /// Committed heap bars.
    pub capacity: RGBAColor,
    /// Young collection segments and markers.
    pub young: RGBColor,
    /// Stems under young collection points.
    pub young_stem: RGBColor,
    /// Full collection segments and markers.
    pub full: RGBColor,
    /// Process start lines.
    pub start: RGBColor,
    /// Start/End annotations.
    pub annotation: RGBColor,
    pub grid: RGBAColor,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: WHITE,
            capacity: RGBColor(140, 191, 64).mix(0.5),
            young: RGBColor(64, 64, 255),
            young_stem: RGBColor(89, 89, 255),
            full: RGBColor(255, 64, 64),
            start: BLACK,
            annotation: RGBColor(255, 0, 0),
            grid: BLACK.mix(0.3),
        }
    }
}

impl Theme {
    pub fn capacity_style(&self) -> ShapeStyle {
        self.capacity.stroke_width(4)
    }

    /// Style for a collection of `kind`.
    pub fn collection_style(&self, kind: CollectionKind) -> ShapeStyle {
        match kind {
            CollectionKind::Young => self.young.stroke_width(1),
            CollectionKind::Full => self.full.stroke_width(1),
        }
    }

    pub fn stem_style(&self) -> ShapeStyle {
        self.young_stem.stroke_width(2)
    }

    pub fn start_style(&self) -> ShapeStyle {
        self.start.stroke_width(1)
    }
}
