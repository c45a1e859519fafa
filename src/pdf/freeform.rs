use image::RgbaImage;

use crate::model::{Block, BlockKind, Document};
use crate::style::{self, NEUTRAL_GRAY, Role};

use super::geometry::PageFormat;
use super::surface::{Composition, DrawOp, Surface};
use super::text::{self, TextFrame};

/// Indices of `blocks` in paint order: ascending `z`, ties kept in their
/// original order.
pub(crate) fn paint_order(blocks: &[Block]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..blocks.len()).collect();
    order.sort_by(|&a, &b| blocks[a].z.total_cmp(&blocks[b].z));
    order
}

fn decode_image(data: Option<&[u8]>) -> Option<RgbaImage> {
    let data = data.filter(|d| !d.is_empty())?;
    match image::load_from_memory(data) {
        Ok(decoded) => Some(decoded.to_rgba8()),
        Err(e) => {
            log::warn!("image block could not be decoded ({e}), drawing placeholder");
            None
        }
    }
}

/// Single-page canvas. Nothing is paginated; text past a block's frame is
/// clipped.
pub(crate) fn render(doc: &Document, format: PageFormat) -> Composition {
    let space = format.space();
    let mut surface = Surface::new(space, "");

    for idx in paint_order(&doc.blocks) {
        let block = &doc.blocks[idx];
        if !block.frame.is_drawable() {
            log::warn!("skipping block {idx}: unusable frame {:?}", block.frame);
            continue;
        }
        let page_rect = space.flip_rect(block.frame);

        match block.kind {
            BlockKind::Text => {
                let run = style::style(Role::Body, &block.text);
                if !run.has_visible_text() {
                    continue;
                }
                surface.push(DrawOp::ClipBegin(page_rect));
                text::draw(&mut surface, &run, TextFrame::boxed(block.frame));
                surface.push(DrawOp::ClipEnd);
            }
            BlockKind::Image => match decode_image(block.image_data.as_deref()) {
                Some(image) => surface.push(DrawOp::Image {
                    rect: page_rect,
                    image,
                }),
                None => surface.push(DrawOp::StrokeRect {
                    rect: page_rect,
                    color: NEUTRAL_GRAY,
                }),
            },
        }
    }

    surface.into_composition()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rect;

    fn at_z(z: f64) -> Block {
        Block::text("x", Rect::new(0.0, 0.0, 10.0, 10.0), z)
    }

    #[test]
    fn equal_z_keeps_original_order() {
        let blocks = vec![at_z(2.0), at_z(2.0), at_z(1.0)];
        assert_eq!(paint_order(&blocks), vec![2, 0, 1]);
    }

    #[test]
    fn nan_z_sorts_after_everything() {
        let blocks = vec![at_z(f64::NAN), at_z(5.0), at_z(-1.0)];
        assert_eq!(paint_order(&blocks), vec![2, 1, 0]);
    }

    #[test]
    fn garbage_image_bytes_are_not_decodable() {
        assert!(decode_image(Some(b"definitely not a png")).is_none());
        assert!(decode_image(Some(&[])).is_none());
        assert!(decode_image(None).is_none());
    }
}
