mod cursor;
mod freeform;
mod geometry;
mod structured;
mod surface;
mod text;

use chrono::{NaiveDate, Utc};
use image::RgbaImage;
use pdf_writer::{Content, Filter, Name, Pdf, Ref, Str, TextStr};

use crate::error::Error;
use crate::fonts::{FontFace, register_fonts, to_winansi_bytes};
use crate::model::{Document, LayoutMode, Rect};
use crate::style::Color;

pub use geometry::{MARGIN, PageFormat};
pub use surface::{Composition, DrawOp, LinkAnnotation, Page, TextOp};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub page_format: PageFormat,
    /// Month shown as the end of open-ended date ranges.
    pub today: NaiveDate,
}

impl ExportOptions {
    pub fn new(page_format: PageFormat, today: NaiveDate) -> Self {
        ExportOptions { page_format, today }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            page_format: PageFormat::Letter,
            today: Utc::now().date_naive(),
        }
    }
}

/// Lay out `doc` without writing PDF.
pub fn compose(doc: &Document, options: &ExportOptions) -> Composition {
    match doc.layout_mode {
        LayoutMode::Structured => structured::render(doc, options.page_format, options.today),
        LayoutMode::Freeform => freeform::render(doc, options.page_format),
    }
}

/// Render `doc` to PDF bytes on `page_format` pages.
pub fn export(doc: &Document, page_format: PageFormat) -> Result<Vec<u8>, Error> {
    export_with(
        doc,
        &ExportOptions {
            page_format,
            ..ExportOptions::default()
        },
    )
}

pub fn export_with(doc: &Document, options: &ExportOptions) -> Result<Vec<u8>, Error> {
    let t0 = std::time::Instant::now();
    let composition = compose(doc, options);
    let t_compose = t0.elapsed();

    let bytes = assemble(&composition, &doc.title)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: compose={:.1}ms, assemble={:.1}ms ({} page(s), {} bytes)",
        t_compose.as_secs_f64() * 1000.0,
        (t_total - t_compose).as_secs_f64() * 1000.0,
        composition.pages.len(),
        bytes.len(),
    );
    Ok(bytes)
}

fn set_fill(content: &mut Content, [r, g, b]: Color) {
    content.set_fill_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
}

/// Embed an RGBA raster as a Flate-compressed RGB XObject, with an SMask
/// when any pixel is not fully opaque.
fn embed_image(pdf: &mut Pdf, alloc: &mut impl FnMut() -> Ref, rgba: &RgbaImage) -> Ref {
    let xobj_ref = alloc();
    let (w, h) = (rgba.width() as i32, rgba.height() as i32);
    let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

    let rgb_data: Vec<u8> = rgba.pixels().flat_map(|p| [p.0[0], p.0[1], p.0[2]]).collect();
    let compressed_rgb = miniz_oxide::deflate::compress_to_vec_zlib(&rgb_data, 6);

    let smask_ref = has_alpha.then(|| {
        let alpha_data: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
        let compressed_alpha = miniz_oxide::deflate::compress_to_vec_zlib(&alpha_data, 6);
        let mask_ref = alloc();
        let mut mask = pdf.image_xobject(mask_ref, &compressed_alpha);
        mask.filter(Filter::FlateDecode);
        mask.width(w);
        mask.height(h);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
        mask_ref
    });

    let mut xobj = pdf.image_xobject(xobj_ref, &compressed_rgb);
    xobj.filter(Filter::FlateDecode);
    xobj.width(w);
    xobj.height(h);
    xobj.color_space().device_rgb();
    xobj.bits_per_component(8);
    xobj.interpolate(true);
    if let Some(mask_ref) = smask_ref {
        xobj.s_mask(mask_ref);
    }
    xobj_ref
}

/// Content stream for one page. `image_names` yields the XObject name of
/// each image op in order.
fn page_content<'a>(page: &Page, image_names: &mut impl Iterator<Item = &'a str>) -> Content {
    let mut content = Content::new();
    let mut in_text = false;
    let mut td = (0.0f32, 0.0f32);
    let mut cur_font: Option<(FontFace, f32)> = None;
    let mut cur_color: Option<Color> = None;

    for op in &page.ops {
        if in_text && !matches!(op, DrawOp::Text(_)) {
            content.end_text();
            in_text = false;
        }
        match op {
            DrawOp::Text(t) => {
                if !in_text {
                    content.begin_text();
                    in_text = true;
                    td = (0.0, 0.0);
                }
                if cur_color != Some(t.color) {
                    set_fill(&mut content, t.color);
                    cur_color = Some(t.color);
                }
                if cur_font != Some((t.face, t.size)) {
                    content.set_font(Name(t.face.pdf_name().as_bytes()), t.size);
                    cur_font = Some((t.face, t.size));
                }
                content.next_line(t.x - td.0, t.y - td.1);
                td = (t.x, t.y);
                content.show(Str(&to_winansi_bytes(&t.text)));
            }
            DrawOp::Image { rect, .. } => {
                let Some(name) = image_names.next() else {
                    continue;
                };
                content.save_state();
                content.transform([rect.width, 0.0, 0.0, rect.height, rect.x, rect.y]);
                content.x_object(Name(name.as_bytes()));
                content.restore_state();
            }
            DrawOp::StrokeRect { rect, color } => {
                let [r, g, b] = *color;
                content.save_state();
                content.set_stroke_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
                content.set_line_width(1.0);
                content.rect(rect.x, rect.y, rect.width, rect.height);
                content.stroke();
                content.restore_state();
            }
            DrawOp::ClipBegin(rect) => {
                content.save_state();
                content.rect(rect.x, rect.y, rect.width, rect.height);
                content.clip_nonzero();
                content.end_path();
            }
            DrawOp::ClipEnd => {
                content.restore_state();
                // Fill colour and font revert with the graphics state.
                cur_color = None;
                cur_font = None;
            }
        }
    }
    if in_text {
        content.end_text();
    }
    content
}

fn pdf_rect(r: Rect) -> pdf_writer::Rect {
    pdf_writer::Rect::new(r.x, r.y, r.max_x(), r.max_y())
}

/// Write `composition` as a PDF file. Object order depends only on the
/// composition, and no dates or ids are written, so output is reproducible.
fn assemble(composition: &Composition, title: &str) -> Result<Vec<u8>, Error> {
    let n = composition.pages.len();
    if n == 0 {
        return Err(Error::RenderFailed("layout produced no pages".into()));
    }

    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();

    let fonts = register_fonts(&mut pdf, &mut alloc);

    let mut image_xobjects: Vec<(String, Ref)> = Vec::new();
    for page in &composition.pages {
        for op in &page.ops {
            if let DrawOp::Image { image, .. } = op {
                let xobj_ref = embed_image(&mut pdf, &mut alloc, image);
                image_xobjects.push((format!("Im{}", image_xobjects.len() + 1), xobj_ref));
            }
        }
    }

    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    let page_annot_refs: Vec<Vec<Ref>> = composition
        .pages
        .iter()
        .map(|page| {
            page.links
                .iter()
                .map(|link| {
                    let annot_ref = alloc();
                    let mut annot = pdf.annotation(annot_ref);
                    annot
                        .subtype(pdf_writer::types::AnnotationType::Link)
                        .rect(pdf_rect(link.rect))
                        .border(0.0, 0.0, 0.0, None);
                    annot
                        .action()
                        .action_type(pdf_writer::types::ActionType::Uri)
                        .uri(Str(link.url.as_bytes()));
                    annot_ref
                })
                .collect()
        })
        .collect();

    let mut names = image_xobjects.iter().map(|(name, _)| name.as_str());
    for (i, page) in composition.pages.iter().enumerate() {
        let raw = page_content(page, &mut names).finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);
    pdf.document_info(info_id)
        .title(TextStr(title))
        .producer(TextStr(concat!("resume-pdf ", env!("CARGO_PKG_VERSION"))));

    let media_box = pdf_writer::Rect::new(0.0, 0.0, composition.page_width, composition.page_height);
    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(media_box)
            .parent(pages_id)
            .contents(content_ids[i]);
        if !page_annot_refs[i].is_empty() {
            page.annotations(page_annot_refs[i].iter().copied());
        }
        let mut resources = page.resources();
        {
            let mut font_dict = resources.fonts();
            for (face, font_ref) in &fonts {
                font_dict.pair(Name(face.pdf_name().as_bytes()), *font_ref);
            }
        }
        if !image_xobjects.is_empty() {
            let mut xobjects = resources.x_objects();
            for (name, xobj_ref) in &image_xobjects {
                xobjects.pair(Name(name.as_bytes()), *xobj_ref);
            }
        }
    }

    Ok(pdf.finish())
}
