mod error;
mod fonts;
pub mod model;
mod pdf;
pub mod style;

pub use error::Error;
pub use fonts::FontFace;
pub use model::{Block, BlockKind, Document, Item, LayoutMode, Link, Person, Rect, Section, SectionKind, Theme};
pub use pdf::{
    Composition, DrawOp, ExportOptions, LinkAnnotation, MARGIN, Page, PageFormat, TextOp, compose, export,
    export_with,
};

use std::path::Path;
use std::time::Instant;

/// Read a JSON document from `input` and write the rendered PDF to `output`.
pub fn convert_json_to_pdf(input: &Path, output: &Path, options: &ExportOptions) -> Result<(), Error> {
    let t0 = Instant::now();

    let raw = std::fs::read(input).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
            std::io::Error::new(e.kind(), format!("{}: {}", e, input.display())),
        ),
        _ => Error::Io(e),
    })?;
    let doc = Document::from_json(&raw)?;
    let t_parse = t0.elapsed();

    let bytes = export_with(&doc, options)?;
    let t_render = t0.elapsed();

    std::fs::write(output, &bytes).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: parse={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_parse.as_secs_f64() * 1000.0,
        (t_render - t_parse).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(())
}
