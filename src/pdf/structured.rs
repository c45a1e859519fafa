use chrono::{DateTime, NaiveDate, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use crate::model::{Document, Item, Link, Person, Rect, SectionKind};
use crate::style::{self, NARROW_SEPARATOR, Role, StyledRun};

use super::cursor::PageCursor;
use super::geometry::PageFormat;
use super::surface::{Composition, Surface};
use super::text::{self, TextFrame};

/// Characters left as-is in the address part of a `mailto:` target.
const MAILTO_ADDRESS: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'@')
    .remove(b'.')
    .remove(b'-')
    .remove(b'_')
    .remove(b'+')
    .remove(b'~');

/// Paginated flow of header, contact rows and sections.
struct Flow {
    cursor: PageCursor,
    surface: Surface,
    frame: Rect,
}

impl Flow {
    /// Reserve space for `run`, draw it, and return the row it occupies in
    /// layout space. Runs without visible text take no space at all.
    fn place(&mut self, run: &StyledRun) -> Option<Rect> {
        if !run.has_visible_text() {
            return None;
        }
        let height = text::height_of(run, self.frame.width);
        let y = self.cursor.reserve(height, &mut self.surface);
        text::draw(
            &mut self.surface,
            run,
            TextFrame::flowing(self.frame.x, y, self.frame.width),
        );
        Some(Rect::new(self.frame.x, y, self.frame.width, height))
    }

    fn place_text(&mut self, role: Role, text: &str) -> Option<Rect> {
        if text.trim().is_empty() {
            return None;
        }
        self.place(&style::style(role, text))
    }

    /// Make a whole row clickable. Must run right after the row was placed,
    /// while its page is still the current one.
    fn link_row(&mut self, row: Rect, url: String) {
        let rect = self.surface.space().flip_rect(row);
        self.surface.add_link(rect, url);
    }
}

pub(crate) fn render(doc: &Document, format: PageFormat, today: NaiveDate) -> Composition {
    let space = format.space();
    let frame = space.content_rect();
    let person = &doc.person;
    let mut flow = Flow {
        cursor: PageCursor::new(frame),
        surface: Surface::new(space, &person.full_name),
        frame,
    };

    flow.place_text(Role::Header, &person.full_name);
    flow.place_text(Role::Subheader, &person.headline);
    let caption = flow.place_text(Role::Caption, &contact_caption(person));
    if let Some(row) = caption
        && let Some(target) = mail_target(&person.email)
    {
        flow.link_row(row, target);
    }

    let links = renderable_links(&person.links);
    if !links.is_empty() {
        flow.place(&style::links_row(
            links.iter().map(|l| (l.label.trim(), l.url.trim())),
        ));
    }

    for section in doc.sections.iter().filter(|s| s.is_visible) {
        flow.place_text(Role::SectionTitle, &section.title);
        for item in &section.items {
            match section.kind {
                SectionKind::Summary => place_summary_item(&mut flow, item),
                _ => place_item(&mut flow, item, today),
            }
        }
    }

    flow.cursor.finalize(&mut flow.surface);
    log::debug!("structured layout: {} page(s)", flow.cursor.page_index());
    flow.surface.into_composition()
}

/// Summary items never show a title: bullets become plain paragraphs.
/// Without bullets, the headline and subheadline text is used instead.
fn place_summary_item(flow: &mut Flow, item: &Item) {
    let has_bullets = item.bullets.iter().any(|b| !b.trim().is_empty());
    if has_bullets {
        for bullet in &item.bullets {
            flow.place_text(Role::Body, bullet);
        }
    } else {
        flow.place_text(Role::Body, &item.headline);
        if let Some(sub) = &item.subheadline {
            flow.place_text(Role::Body, sub);
        }
    }
}

fn place_item(flow: &mut Flow, item: &Item, today: NaiveDate) {
    let dates = date_range(item.start_date, item.end_date, today);
    flow.place(&style::role_line(
        &item.headline,
        item.subheadline.as_deref(),
        dates.as_deref(),
        item.location(),
    ));
    for bullet in &item.bullets {
        flow.place_text(Role::Bullet, bullet);
    }
}

fn contact_caption(person: &Person) -> String {
    [&person.email, &person.phone, &person.location]
        .into_iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(NARROW_SEPARATOR)
}

/// `mailto:` target for `email`, or `None` if it is not a plausible address.
pub(crate) fn mail_target(email: &str) -> Option<String> {
    let email = email.trim();
    let (local, domain) = email.split_once('@')?;
    if local.is_empty()
        || domain.is_empty()
        || domain.contains('@')
        || email.chars().any(char::is_whitespace)
    {
        return None;
    }
    let target = format!("mailto:{}", utf8_percent_encode(email, MAILTO_ADDRESS));
    Url::parse(&target).ok()?;
    Some(target)
}

/// Links with a non-blank label and an absolute URL, in their original order.
pub(crate) fn renderable_links(links: &[Link]) -> Vec<&Link> {
    links
        .iter()
        .filter(|link| {
            let ok = !link.label.trim().is_empty()
                && Url::parse(link.url.trim()).is_ok_and(|u| !u.scheme().is_empty());
            if !ok {
                log::debug!("dropping link {:?} -> {:?}", link.label, link.url);
            }
            ok
        })
        .collect()
}

/// `"Jan 2020 – Mar 2022"`. An open range ends at `today`; no start, no range.
pub(crate) fn date_range(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    today: NaiveDate,
) -> Option<String> {
    let start = start?.date_naive();
    let end = end.map_or(today, |e| e.date_naive());
    Some(format!("{} – {}", start.format("%b %Y"), end.format("%b %Y")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(y: i32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, 15, 12, 0, 0).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn closed_range_formats_both_ends() {
        let r = date_range(Some(instant(2020, 1)), Some(instant(2022, 3)), today());
        assert_eq!(r.as_deref(), Some("Jan 2020 – Mar 2022"));
    }

    #[test]
    fn open_range_ends_at_reference_month() {
        let r = date_range(Some(instant(2022, 1)), None, today());
        assert_eq!(r.as_deref(), Some("Jan 2022 – Oct 2026"));
    }

    #[test]
    fn missing_start_drops_the_range() {
        assert_eq!(date_range(None, Some(instant(2022, 3)), today()), None);
        assert_eq!(date_range(None, None, today()), None);
    }

    #[test]
    fn mail_target_percent_encodes_the_address() {
        assert_eq!(mail_target(" ada@example.com ").as_deref(), Some("mailto:ada@example.com"));
        assert_eq!(
            mail_target("ada+cv@example.com").as_deref(),
            Some("mailto:ada+cv@example.com")
        );
        assert_eq!(mail_target("a%b@example.com").as_deref(), Some("mailto:a%25b@example.com"));
    }

    #[test]
    fn mail_target_rejects_non_addresses() {
        for bad in ["", "ada", "@example.com", "ada@", "a b@example.com", "a@b@c"] {
            assert_eq!(mail_target(bad), None, "{bad:?}");
        }
    }

    #[test]
    fn only_labelled_absolute_links_are_renderable() {
        let links = vec![
            Link::new("LinkedIn", "https://x"),
            Link::new("", "https://y"),
            Link::new("Bad", "not-a-url"),
        ];
        let kept: Vec<_> = renderable_links(&links).iter().map(|l| l.label.as_str()).collect();
        assert_eq!(kept, ["LinkedIn"]);
    }

    #[test]
    fn contact_caption_skips_empty_fields() {
        let person = Person {
            email: "ada@example.com".into(),
            location: "London".into(),
            ..Person::default()
        };
        assert_eq!(contact_caption(&person), "ada@example.com • London");
    }
}
