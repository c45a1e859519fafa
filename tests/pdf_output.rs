mod common;

use common::*;
use resume_pdf::{
    Block, Document, Error, LayoutMode, Link, PageFormat, Person, Rect, Section, SectionKind, convert_json_to_pdf,
    export_with,
};

fn full_document() -> Document {
    let person = Person {
        links: vec![Link::new("LinkedIn", "https://x"), Link::new("Bad", "not-a-url")],
        ..ada()
    };
    let mut experience = Section::new(SectionKind::Experience, "Experience");
    experience.items.push(experience_item());
    document(person, vec![summary_with_paragraphs(3), experience])
}

#[test]
fn output_is_a_pdf() {
    let bytes = export_with(&full_document(), &options(PageFormat::Letter)).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(contains(&bytes, "%%EOF"));
}

#[test]
fn rendering_twice_is_byte_identical() {
    let doc = full_document();
    let a = export_with(&doc, &options(PageFormat::Letter)).unwrap();
    let b = export_with(&doc, &options(PageFormat::Letter)).unwrap();
    assert_eq!(a, b);

    let mut canvas = doc.clone();
    canvas.layout_mode = LayoutMode::Freeform;
    canvas.blocks = vec![Block::image(Some(png_bytes(4, 4)), Rect::new(10.0, 10.0, 40.0, 40.0), 0.0)];
    let a = export_with(&canvas, &options(PageFormat::A4)).unwrap();
    let b = export_with(&canvas, &options(PageFormat::A4)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn media_box_follows_the_page_preset() {
    let doc = full_document();
    let letter = export_with(&doc, &options(PageFormat::Letter)).unwrap();
    let a4 = export_with(&doc, &options(PageFormat::A4)).unwrap();

    assert!(contains(&letter, "/MediaBox [0 0 612 792]"));
    assert!(contains(&a4, "/MediaBox [0 0 595 842]"));
}

#[test]
fn links_become_uri_annotations() {
    let bytes = export_with(&full_document(), &options(PageFormat::Letter)).unwrap();

    assert!(contains(&bytes, "/Subtype /Link"));
    assert!(contains(&bytes, "/URI (mailto:ada@example.com)"));
    assert!(contains(&bytes, "/URI (https://x)"));
    assert!(!contains(&bytes, "not-a-url"));
}

#[test]
fn page_tree_counts_every_page() {
    let doc = document(Person::default(), vec![summary_with_paragraphs(75)]);
    let bytes = export_with(&doc, &options(PageFormat::Letter)).unwrap();
    assert!(contains(&bytes, "/Count 3"));
}

#[test]
fn content_streams_are_compressed() {
    let _ = env_logger::try_init();
    const MAX_BYTES: usize = 12_000;
    let doc = document(Person::default(), vec![summary_with_paragraphs(75)]);
    let bytes = export_with(&doc, &options(PageFormat::Letter)).unwrap();

    assert!(contains(&bytes, "/Filter /FlateDecode"));
    assert!(!contains(&bytes, "(Paragraph) Tj"));
    assert!(bytes.len() < MAX_BYTES, "{} bytes for three text pages", bytes.len());
}

#[test]
fn text_is_written_with_standard_fonts() {
    let bytes = export_with(&full_document(), &options(PageFormat::Letter)).unwrap();

    assert!(contains(&bytes, "/BaseFont /Helvetica"));
    assert!(contains(&bytes, "/BaseFont /Helvetica-Bold"));
    let streams = inflated_streams(&bytes);
    assert!(streams.iter().any(|s| contains(s, "(Lovelace) Tj")));
    assert!(streams.iter().any(|s| contains(s, "(EXPERIENCE) Tj")));
}

#[test]
fn images_are_embedded_with_interpolation() {
    let doc = Document {
        layout_mode: LayoutMode::Freeform,
        blocks: vec![
            Block::image(Some(png_bytes(2, 2)), Rect::new(10.0, 10.0, 40.0, 40.0), 0.0),
            Block::image(None, Rect::new(60.0, 10.0, 40.0, 40.0), 1.0),
        ],
        ..Document::default()
    };
    let bytes = export_with(&doc, &options(PageFormat::Letter)).unwrap();

    assert!(contains(&bytes, "/Subtype /Image"));
    assert!(contains(&bytes, "/Interpolate true"));
    let streams = inflated_streams(&bytes);
    assert!(streams.iter().any(|s| contains(s, "/Im1 Do")));
}

#[test]
fn title_goes_into_document_info() {
    let bytes = export_with(&full_document(), &options(PageFormat::Letter)).unwrap();
    assert!(contains(&bytes, "/Title (Ada's CV)"));
    assert!(!contains(&bytes, "/CreationDate"));
}

#[test]
fn json_documents_convert_to_files() {
    let _ = env_logger::try_init();
    let json = r#"{
        "title": "CV",
        "person": { "full_name": "Grace Hopper", "email": "grace@navy.mil" },
        "sections": [
            { "kind": "experience", "title": "Experience", "items": [
                { "headline": "US Navy", "subheadline": "Rear Admiral",
                  "start_date": "1943-12-01T00:00:00Z", "end_date": "1986-08-14T00:00:00Z",
                  "bullets": ["COBOL"], "meta": { "location": "Arlington" } }
            ] },
            { "kind": "skills", "title": "Hidden", "is_visible": false }
        ]
    }"#;
    let doc = Document::from_json(json.as_bytes()).unwrap();
    assert_eq!(doc.sections.len(), 2);
    assert!(doc.sections[0].is_visible);
    assert_eq!(doc.sections[0].items[0].location(), Some("Arlington"));

    let dir = std::env::temp_dir().join(format!("resume-pdf-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let input = dir.join("cv.json");
    let output = dir.join("cv.pdf");
    std::fs::write(&input, json).unwrap();

    convert_json_to_pdf(&input, &output, &options(PageFormat::A4)).unwrap();
    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn malformed_json_is_an_invalid_document() {
    let err = Document::from_json(b"{ \"sections\": 5 }").unwrap_err();
    assert!(matches!(err, Error::InvalidDocument(_)));
}

#[test]
fn missing_input_file_is_an_io_error() {
    let missing = std::env::temp_dir().join("resume-pdf-definitely-missing.json");
    let err = convert_json_to_pdf(&missing, &missing.with_extension("pdf"), &options(PageFormat::Letter))
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
