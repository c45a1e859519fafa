#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use resume_pdf::{Document, ExportOptions, Item, PageFormat, Person, Section, SectionKind};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

pub fn options(format: PageFormat) -> ExportOptions {
    ExportOptions::new(format, today())
}

pub fn instant(year: i32, month: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, 1, 9, 0, 0).unwrap()
}

pub fn ada() -> Person {
    Person {
        full_name: "Ada Lovelace".into(),
        headline: "Analytical Engineer".into(),
        email: "ada@example.com".into(),
        phone: String::new(),
        location: "London".into(),
        links: Vec::new(),
    }
}

pub fn document(person: Person, sections: Vec<Section>) -> Document {
    Document {
        title: "Ada's CV".into(),
        person,
        sections,
        ..Document::default()
    }
}

/// A summary section whose single item holds `n` one-line paragraphs.
pub fn summary_with_paragraphs(n: usize) -> Section {
    let mut item = Item::new("");
    item.bullets = (0..n).map(|i| format!("Paragraph {i}")).collect();
    let mut section = Section::new(SectionKind::Summary, "");
    section.items.push(item);
    section
}

pub fn experience_item() -> Item {
    let mut item = Item::new("Acme");
    item.subheadline = Some("Engineer".into());
    item.start_date = Some(instant(2020, 1));
    item.end_date = Some(instant(2022, 3));
    item.meta.insert("location".into(), "Pune".into());
    item.bullets = vec!["Built things".into(), "   ".into()];
    item
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 40, 40, 255]));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// Inflate every Flate stream in a PDF produced by this crate.
pub fn inflated_streams(pdf: &[u8]) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    let mut rest = pdf;
    while let Some(start) = find(rest, b"stream\n") {
        let body = &rest[start + b"stream\n".len()..];
        let Some(end) = find(body, b"\nendstream") else {
            break;
        };
        if let Ok(data) = miniz_oxide::inflate::decompress_to_vec_zlib(&body[..end]) {
            out.push(data);
        }
        rest = &body[end + b"\nendstream".len()..];
    }
    out
}

pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

pub fn contains(haystack: &[u8], needle: &str) -> bool {
    find(haystack, needle.as_bytes()).is_some()
}
