use crate::model::Rect;

/// Inset of the content rectangle from every page edge.
pub const MARGIN: f32 = 48.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum PageFormat {
    /// 8.5 × 11 in.
    #[default]
    Letter,
    /// 210 × 297 mm.
    A4,
}

impl PageFormat {
    /// `(width, height)` in points.
    pub fn size(self) -> (f32, f32) {
        match self {
            PageFormat::Letter => (612.0, 792.0),
            PageFormat::A4 => (595.0, 842.0),
        }
    }

    pub(crate) fn space(self) -> PageSpace {
        let (width, height) = self.size();
        PageSpace { width, height }
    }
}

/// The page as seen by layout code: top-left origin, y grows downwards.
/// PDF content and annotations use a bottom-left origin; every conversion
/// between the two goes through [`PageSpace::flip_y`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PageSpace {
    pub(crate) width: f32,
    pub(crate) height: f32,
}

impl PageSpace {
    /// Bottom edge, in PDF space, of something `height` tall whose top edge
    /// sits at `top` in layout space. With `height == 0` this maps a point.
    pub(crate) fn flip_y(&self, top: f32, height: f32) -> f32 {
        self.height - top - height
    }

    pub(crate) fn flip_rect(&self, r: Rect) -> Rect {
        Rect::new(r.x, self.flip_y(r.y, r.height), r.width, r.height)
    }

    pub(crate) fn content_rect(&self) -> Rect {
        Rect::new(MARGIN, MARGIN, self.width - 2.0 * MARGIN, self.height - 2.0 * MARGIN)
    }
}
