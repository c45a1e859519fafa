use crate::model::Rect;

use super::surface::Surface;

/// Vertical gap added after every placed block.
pub(crate) const LINE_SPACING: f32 = 10.0;

/// Vertical write position within the content rectangle, in layout space.
pub(crate) struct PageCursor {
    content: Rect,
    current_y: f32,
    page_index: usize,
}

impl PageCursor {
    pub(crate) fn new(content: Rect) -> Self {
        PageCursor {
            content,
            current_y: content.y,
            page_index: 1,
        }
    }

    pub(crate) fn page_index(&self) -> usize {
        self.page_index
    }

    /// Claim `height` units and return the top y to draw at. Starts a new
    /// page first when the block would cross the bottom of the content
    /// rectangle, unless the current page is still empty: a block taller
    /// than the whole rectangle is placed at the top and overflows.
    pub(crate) fn reserve(&mut self, height: f32, surface: &mut Surface) -> f32 {
        let page_has_content = self.current_y > self.content.y;
        if page_has_content && self.current_y + height > self.content.max_y() {
            self.break_page(surface);
        }
        let y = self.current_y;
        self.current_y += height + LINE_SPACING;
        y
    }

    fn break_page(&mut self, surface: &mut Surface) {
        if self.page_index > 1 {
            surface.draw_footer(self.page_index);
        }
        surface.begin_page();
        self.current_y = self.content.y;
        self.page_index += 1;
        log::debug!("page break: now on page {}", self.page_index);
    }

    /// Footer for the last page of a multi-page document.
    pub(crate) fn finalize(&self, surface: &mut Surface) {
        if self.page_index > 1 {
            surface.draw_footer(self.page_index);
        }
    }
}
