use image::RgbaImage;

use crate::fonts::FontFace;
use crate::model::Rect;
use crate::style::{self, Color, Role};

use super::geometry::{MARGIN, PageSpace};
use super::text::{self, TextFrame};

/// A single positioned string. `x`/`y` are the PDF-space baseline origin.
#[derive(Clone, Debug, PartialEq)]
pub struct TextOp {
    pub x: f32,
    pub y: f32,
    pub face: FontFace,
    pub size: f32,
    pub color: Color,
    pub text: String,
}

/// Rectangles are in PDF space (bottom-left origin).
#[derive(Debug)]
pub enum DrawOp {
    Text(TextOp),
    Image { rect: Rect, image: RgbaImage },
    StrokeRect { rect: Rect, color: Color },
    ClipBegin(Rect),
    ClipEnd,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinkAnnotation {
    pub rect: Rect,
    pub url: String,
}

#[derive(Debug, Default)]
pub struct Page {
    pub ops: Vec<DrawOp>,
    pub links: Vec<LinkAnnotation>,
}

impl Page {
    pub fn text_ops(&self) -> impl Iterator<Item = &TextOp> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(t) => Some(t),
            _ => None,
        })
    }

    /// Words drawn on the page, in draw order, joined by single spaces.
    pub fn text(&self) -> String {
        self.text_ops().map(|t| t.text.as_str()).collect::<Vec<_>>().join(" ")
    }
}

/// Laid-out pages ready to be written as PDF.
#[derive(Debug)]
pub struct Composition {
    pub page_width: f32,
    pub page_height: f32,
    pub pages: Vec<Page>,
}

/// Multi-page drawing target shared by both renderers. Always holds at least
/// one page.
pub(crate) struct Surface {
    space: PageSpace,
    footer_name: String,
    pages: Vec<Page>,
}

impl Surface {
    pub(crate) fn new(space: PageSpace, footer_name: &str) -> Self {
        Surface {
            space,
            footer_name: footer_name.trim().to_string(),
            pages: vec![Page::default()],
        }
    }

    pub(crate) fn space(&self) -> PageSpace {
        self.space
    }

    pub(crate) fn begin_page(&mut self) {
        self.pages.push(Page::default());
    }

    fn current(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub(crate) fn push(&mut self, op: DrawOp) {
        self.current().ops.push(op);
    }

    /// `rect` must already be in PDF space.
    pub(crate) fn add_link(&mut self, rect: Rect, url: String) {
        self.current().links.push(LinkAnnotation { rect, url });
    }

    /// Footer on the current page, centred vertically in the bottom margin.
    pub(crate) fn draw_footer(&mut self, page_number: usize) {
        let label = if self.footer_name.is_empty() {
            format!("Page {page_number}")
        } else {
            format!("{} — Page {page_number}", self.footer_name)
        };
        let run = style::style(Role::Footer, &label);
        let content = self.space.content_rect();
        let top = content.max_y() + (MARGIN - run.line_height()) / 2.0;
        text::draw(self, &run, TextFrame::flowing(content.x, top, content.width));
    }

    pub(crate) fn into_composition(self) -> Composition {
        Composition {
            page_width: self.space.width,
            page_height: self.space.height,
            pages: self.pages,
        }
    }
}
