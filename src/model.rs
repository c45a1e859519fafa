use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Structured,
    Freeform,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Achievements,
    Custom,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    #[default]
    Text,
    Image,
}

/// Axis-aligned rectangle. Whether `y` grows downwards (editor space) or
/// upwards (PDF page space) depends on where the value came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    pub(crate) fn is_drawable(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Link {
            label: label.into(),
            url: url.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    pub full_name: String,
    pub headline: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub links: Vec<Link>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub headline: String,
    #[serde(default)]
    pub subheadline: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub meta: BTreeMap<String, String>,
}

impl Item {
    pub fn new(headline: impl Into<String>) -> Self {
        Item {
            headline: headline.into(),
            subheadline: None,
            start_date: None,
            end_date: None,
            bullets: Vec::new(),
            meta: BTreeMap::new(),
        }
    }

    pub fn location(&self) -> Option<&str> {
        self.meta.get("location").map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    pub title: String,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default = "visible_by_default")]
    pub is_visible: bool,
}

fn visible_by_default() -> bool {
    true
}

impl Section {
    pub fn new(kind: SectionKind, title: impl Into<String>) -> Self {
        Section {
            kind,
            title: title.into(),
            items: Vec::new(),
            is_visible: true,
        }
    }
}

/// Visual theme chosen in the editor. Carried with the document; the
/// renderer's style table does not read it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub name: String,
    pub accent_hex: String,
    pub body_font_name: String,
    pub header_font_name: String,
    pub body_size: f64,
    pub header_size: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            name: "Classic".into(),
            accent_hex: "#0A84FF".into(),
            body_font_name: "Helvetica".into(),
            header_font_name: "Helvetica-Bold".into(),
            body_size: 11.0,
            header_size: 15.0,
        }
    }
}

/// A positioned element of the free-form canvas.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
    pub image_data: Option<Vec<u8>>,
    /// Top-left origin, in page units.
    pub frame: Rect,
    pub z: f64,
}

impl Block {
    pub fn text(text: impl Into<String>, frame: Rect, z: f64) -> Self {
        Block {
            kind: BlockKind::Text,
            text: text.into(),
            image_data: None,
            frame,
            z,
        }
    }

    pub fn image(image_data: Option<Vec<u8>>, frame: Rect, z: f64) -> Self {
        Block {
            kind: BlockKind::Image,
            text: String::new(),
            image_data,
            frame,
            z,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub title: String,
    pub person: Person,
    pub sections: Vec<Section>,
    pub theme: Theme,
    pub layout_mode: LayoutMode,
    pub blocks: Vec<Block>,
}

impl Default for Document {
    fn default() -> Self {
        Document {
            title: "My Résumé".into(),
            person: Person::default(),
            sections: Vec::new(),
            theme: Theme::default(),
            layout_mode: LayoutMode::Structured,
            blocks: Vec::new(),
        }
    }
}

impl Document {
    pub fn from_json(bytes: &[u8]) -> Result<Self, Error> {
        serde_json::from_slice(bytes).map_err(|e| Error::InvalidDocument(e.to_string()))
    }
}
