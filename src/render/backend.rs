//! Drawing backend wrapper that keeps text working without a font engine.
//!
//! Without the `text-labels` feature plotters has no font engine, so text
//! is rasterized from the built-in bitmap font in [`super::glyphs`]. With
//! it, the font engine is tried first and the bitmap font takes over when
//! it reports a `FontError` or panics (no usable system fonts).

use std::panic;

use plotters_backend::text_anchor::{HPos, VPos};
use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
    FontTransform,
};
use tracing::debug;

use super::glyphs;

pub struct TextSafeBackend<DB> {
    inner: DB,
}

impl<DB> TextSafeBackend<DB> {
    pub fn new(inner: DB) -> Self {
        Self { inner }
    }
}

impl<DB: DrawingBackend> DrawingBackend for TextSafeBackend<DB> {
    type ErrorType = DB::ErrorType;

    fn get_size(&self) -> (u32, u32) {
        self.inner.get_size()
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.ensure_prepared()
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.present()
    }

    fn draw_pixel(
        &mut self,
        point: BackendCoord,
        color: BackendColor,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_pixel(point, color)
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_line(from, to, style)
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_rect(upper_left, bottom_right, style, fill)
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_path(path, style)
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_circle(center, radius, style, fill)
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.fill_polygon(vert, style)
    }

    fn blit_bitmap(
        &mut self,
        pos: BackendCoord,
        (iw, ih): (u32, u32),
        src: &[u8],
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.blit_bitmap(pos, (iw, ih), src)
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        if !cfg!(feature = "text-labels") {
            return self.draw_bitmap_text(text, style, pos);
        }
        match panic::catch_unwind(panic::AssertUnwindSafe(|| {
            self.inner.draw_text(text, style, pos)
        })) {
            Ok(Err(DrawingErrorKind::FontError(err))) => {
                debug!(%err, text, "font engine failed, using bitmap font");
                self.draw_bitmap_text(text, style, pos)
            }
            Ok(result) => result,
            Err(_) => self.draw_bitmap_text(text, style, pos),
        }
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<Self::ErrorType>> {
        if !cfg!(feature = "text-labels") {
            return Ok(bitmap_text_size(text, style));
        }
        match panic::catch_unwind(panic::AssertUnwindSafe(|| {
            self.inner.estimate_text_size(text, style)
        })) {
            Ok(Err(DrawingErrorKind::FontError(_))) | Err(_) => Ok(bitmap_text_size(text, style)),
            Ok(result) => result,
        }
    }
}

fn bitmap_text_size<TStyle: BackendTextStyle>(text: &str, style: &TStyle) -> (u32, u32) {
    let (width, height) = glyphs::text_extent(text, glyphs::scale_for(style.size()));
    (width as u32, height as u32)
}

impl<DB: DrawingBackend> TextSafeBackend<DB> {
    /// Draw `text` with the built-in bitmap font, honoring anchor and
    /// quarter-turn rotations.
    fn draw_bitmap_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<DB::ErrorType>> {
        let color = style.color();
        if color.alpha == 0.0 || text.trim().is_empty() {
            return Ok(());
        }

        let scale = glyphs::scale_for(style.size());
        let (width, height) = glyphs::text_extent(text, scale);
        let transform = style.transform();
        let (box_w, box_h) = match transform {
            FontTransform::Rotate90 | FontTransform::Rotate270 => (height, width),
            _ => (width, height),
        };

        let anchor = style.anchor();
        let left = pos.0
            - match anchor.h_pos {
                HPos::Left => 0,
                HPos::Center => box_w / 2,
                HPos::Right => box_w,
            };
        let top = pos.1
            - match anchor.v_pos {
                VPos::Top => 0,
                VPos::Center => box_h / 2,
                VPos::Bottom => box_h,
            };

        let mut pixels = Vec::new();
        glyphs::rasterize(text, scale, |x, y| {
            let (px, py) = match transform {
                FontTransform::Rotate90 => (height - 1 - y, x),
                FontTransform::Rotate180 => (width - 1 - x, height - 1 - y),
                FontTransform::Rotate270 => (y, width - 1 - x),
                _ => (x, y),
            };
            pixels.push((left + px, top + py));
        });

        let (canvas_w, canvas_h) = self.inner.get_size();
        for (x, y) in pixels {
            if x >= 0 && y >= 0 && (x as u32) < canvas_w && (y as u32) < canvas_h {
                self.inner.draw_pixel((x, y), color)?;
            }
        }
        Ok(())
    }
}
