//! Fixed style table: every semantic text role maps to one font, size,
//! colour and paragraph geometry. Nothing here is configurable at call time.

use crate::fonts::FontFace;

pub type Color = [u8; 3];

pub const LABEL: Color = [0, 0, 0];
pub const SECONDARY_LABEL: Color = [110, 110, 115];
pub const LINK_BLUE: Color = [0, 122, 255];
pub const NEUTRAL_GRAY: Color = [142, 142, 147];

/// Separator between tail fragments of a role line and between link labels.
pub const WIDE_SEPARATOR: &str = "  •  ";
/// Separator between contact fields in the caption row.
pub const NARROW_SEPARATOR: &str = " • ";

const BULLET_PREFIX: &str = "• ";
const BULLET_INDENT: f32 = 12.0;
const BULLET_HANG: f32 = 8.0;
const NATURAL_LINE_RATIO: f32 = 1.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Header,
    Subheader,
    Caption,
    SectionTitle,
    ItemTitle,
    Body,
    Bullet,
    Link,
    Footer,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size: f32,
    pub color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ParagraphStyle {
    pub min_line_height: Option<f32>,
    pub max_line_height: Option<f32>,
    /// Indent of the first line from the left edge of the frame.
    pub first_line_indent: f32,
    /// Indent of every following line.
    pub head_indent: f32,
    pub space_before: f32,
    pub space_after: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Span {
    pub text: String,
    pub style: TextStyle,
    /// Target URL when this span is a clickable label.
    pub link: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StyledRun {
    pub spans: Vec<Span>,
    pub paragraph: ParagraphStyle,
}

impl StyledRun {
    pub fn has_visible_text(&self) -> bool {
        self.spans.iter().any(|s| !s.text.trim().is_empty())
    }

    /// Concatenated text of every span.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Height of one line: the tallest span's natural height, clamped to the
    /// paragraph's min/max line height.
    pub fn line_height(&self) -> f32 {
        let natural = self.max_font_size() * NATURAL_LINE_RATIO;
        let p = &self.paragraph;
        let h = p.min_line_height.map_or(natural, |min| natural.max(min));
        p.max_line_height.map_or(h, |max| h.min(max))
    }

    pub fn max_font_size(&self) -> f32 {
        self.spans.iter().map(|s| s.style.size).fold(0.0, f32::max)
    }
}

fn text_style(role: Role) -> TextStyle {
    let (face, size, color) = match role {
        Role::Header => (FontFace::Bold, 18.0, LABEL),
        Role::Subheader => (FontFace::Bold, 13.0, LABEL),
        Role::Caption => (FontFace::Regular, 10.0, SECONDARY_LABEL),
        Role::SectionTitle => (FontFace::Bold, 12.0, LABEL),
        Role::ItemTitle => (FontFace::Bold, 11.0, LABEL),
        Role::Body | Role::Bullet => (FontFace::Regular, 11.0, LABEL),
        Role::Link => (FontFace::Regular, 10.0, LINK_BLUE),
        Role::Footer => (FontFace::Regular, 9.0, SECONDARY_LABEL),
    };
    TextStyle { face, size, color }
}

fn paragraph_style(role: Role) -> ParagraphStyle {
    let fixed = |h: f32| ParagraphStyle {
        min_line_height: Some(h),
        max_line_height: Some(h),
        ..ParagraphStyle::default()
    };
    match role {
        Role::Header => fixed(20.0),
        Role::Subheader => fixed(16.0),
        Role::Body => fixed(13.0),
        Role::Bullet => ParagraphStyle {
            first_line_indent: BULLET_INDENT,
            head_indent: BULLET_INDENT + BULLET_HANG,
            space_after: 2.0,
            ..fixed(13.0)
        },
        Role::SectionTitle => ParagraphStyle {
            space_before: 10.0,
            space_after: 4.0,
            ..ParagraphStyle::default()
        },
        Role::Caption | Role::ItemTitle | Role::Link | Role::Footer => ParagraphStyle::default(),
    }
}

/// Style `text` for `role`.
pub fn style(role: Role, text: &str) -> StyledRun {
    let text = match role {
        Role::SectionTitle => text.to_uppercase(),
        Role::Bullet => format!("{BULLET_PREFIX}{text}"),
        _ => text.to_string(),
    };
    StyledRun {
        spans: vec![Span {
            text,
            style: text_style(role),
            link: None,
        }],
        paragraph: paragraph_style(role),
    }
}

/// Bold `label` followed by the non-empty tail fragments in a secondary
/// style, joined by [`WIDE_SEPARATOR`].
pub fn role_line(label: &str, role: Option<&str>, dates: Option<&str>, location: Option<&str>) -> StyledRun {
    let tail: Vec<&str> = [role, dates, location]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let label = label.trim();
    let mut spans = Vec::with_capacity(2);
    if !label.is_empty() {
        spans.push(Span {
            text: label.to_string(),
            style: text_style(Role::ItemTitle),
            link: None,
        });
    }
    if !tail.is_empty() {
        let lead = if spans.is_empty() { "" } else { WIDE_SEPARATOR };
        spans.push(Span {
            text: format!("{lead}{}", tail.join(WIDE_SEPARATOR)),
            style: TextStyle {
                color: SECONDARY_LABEL,
                ..text_style(Role::Body)
            },
            link: None,
        });
    }
    StyledRun {
        spans,
        paragraph: ParagraphStyle::default(),
    }
}

/// One span per `(label, url)` pair, each tagged with its target, with
/// separator spans between them.
pub fn links_row<'a>(links: impl IntoIterator<Item = (&'a str, &'a str)>) -> StyledRun {
    let style = text_style(Role::Link);
    let mut spans = Vec::new();
    for (label, url) in links {
        if !spans.is_empty() {
            spans.push(Span {
                text: WIDE_SEPARATOR.to_string(),
                style: TextStyle {
                    color: SECONDARY_LABEL,
                    ..style
                },
                link: None,
            });
        }
        spans.push(Span {
            text: label.to_string(),
            style,
            link: Some(url.to_string()),
        });
    }
    StyledRun {
        spans,
        paragraph: paragraph_style(Role::Link),
    }
}
