// src/services/extractor.rs

//! Episode extraction from raw feed text.
//!
//! Reads RSS 2.0 `<item>` and Atom `<entry>` elements. Parsing is best-effort:
//! empty or malformed input yields no episodes instead of an error.

use std::borrow::Cow;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::models::EpisodeRecord;

/// Extract episode records from feed content, in document order.
pub fn extract_episodes(content: &str) -> Vec<EpisodeRecord> {
    match parse_entries(content) {
        Ok(records) => records,
        Err(e) => {
            log::warn!("Malformed feed, no episodes extracted: {}", e);
            Vec::new()
        }
    }
}

fn parse_entries(content: &str) -> Result<Vec<EpisodeRecord>, quick_xml::Error> {
    let mut reader = Reader::from_str(content);

    let mut records = Vec::new();
    let mut depth = 0usize;

    // Open <item>/<entry> and its depth
    let mut current: Option<(EntryBuilder, usize)> = None;
    // Field being captured and its accumulated text
    let mut capture: Option<(Field, String)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                match current.as_mut() {
                    None => {
                        if is_entry(&e) {
                            current = Some((EntryBuilder::default(), depth));
                        }
                    }
                    Some((builder, entry_depth)) => {
                        if depth == *entry_depth + 1 {
                            if let Some(field) = Field::from_element(&e) {
                                if field == Field::Link {
                                    builder.link_from_attributes(&e);
                                }
                                capture = Some((field, String::new()));
                            }
                        }
                    }
                }
            }
            Event::Empty(e) => {
                if let Some((builder, entry_depth)) = current.as_mut() {
                    if depth == *entry_depth && e.local_name().as_ref() == b"link" {
                        builder.link_from_attributes(&e);
                    }
                }
            }
            Event::Text(e) => {
                if let Some((_, text)) = capture.as_mut() {
                    text.push_str(&unescape_lossy(&String::from_utf8_lossy(&e)));
                }
            }
            Event::CData(e) => {
                if let Some((_, text)) = capture.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(_) => {
                let entry_depth = current.as_ref().map(|(_, d)| *d);
                match entry_depth {
                    Some(d) if depth == d + 1 => {
                        if let (Some((builder, _)), Some((field, text))) =
                            (current.as_mut(), capture.take())
                        {
                            builder.set(field, text);
                        }
                    }
                    Some(d) if depth == d => {
                        if let Some((builder, _)) = current.take() {
                            records.push(builder.build());
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(records)
}

fn is_entry(e: &BytesStart<'_>) -> bool {
    matches!(e.local_name().as_ref(), b"item" | b"entry")
}

/// Entry child elements that feed an episode field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Description,
    Summary,
    Content,
    Link,
    Published,
    Updated,
    Id,
}

impl Field {
    /// Match on the local name so prefixed feeds (`<atom:title>`) resolve too.
    /// `content:encoded` and `dc:date` are only recognized with their prefix.
    fn from_element(e: &BytesStart<'_>) -> Option<Self> {
        match e.name().as_ref() {
            b"content:encoded" => return Some(Self::Content),
            b"dc:date" => return Some(Self::Updated),
            _ => {}
        }
        match e.local_name().as_ref() {
            b"title" => Some(Self::Title),
            b"description" => Some(Self::Description),
            b"summary" => Some(Self::Summary),
            b"content" => Some(Self::Content),
            b"link" => Some(Self::Link),
            b"pubDate" | b"published" => Some(Self::Published),
            b"updated" => Some(Self::Updated),
            b"guid" | b"id" => Some(Self::Id),
            _ => None,
        }
    }
}

/// Loose per-entry fields; resolved to an [`EpisodeRecord`] by [`EntryBuilder::build`].
#[derive(Default)]
struct EntryBuilder {
    title: Option<String>,
    description: Option<String>,
    summary: Option<String>,
    content: Option<String>,
    link: Option<String>,
    published: Option<String>,
    updated: Option<String>,
    id: Option<String>,
}

impl EntryBuilder {
    /// Store a field value. The first non-empty occurrence wins.
    fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::Summary => &mut self.summary,
            Field::Content => &mut self.content,
            Field::Link => &mut self.link,
            Field::Published => &mut self.published,
            Field::Updated => &mut self.updated,
            Field::Id => &mut self.id,
        };
        let value = value.trim();
        if slot.is_none() && !value.is_empty() {
            *slot = Some(value.to_string());
        }
    }

    /// Atom `<link href="..">`; only alternate (or unqualified) links count.
    fn link_from_attributes(&mut self, e: &BytesStart<'_>) {
        let rel = attribute(e, "rel");
        if !matches!(rel.as_deref(), None | Some("alternate")) {
            return;
        }
        if let Some(href) = attribute(e, "href") {
            self.set(Field::Link, href);
        }
    }

    fn build(self) -> EpisodeRecord {
        let link = self.link.unwrap_or_default();
        EpisodeRecord {
            title: self.title.unwrap_or_default(),
            description: self
                .description
                .or(self.summary)
                .or(self.content)
                .unwrap_or_default(),
            published_at: self.published.or(self.updated).unwrap_or_default(),
            guid: self.id.unwrap_or_else(|| link.clone()),
            link,
        }
    }
}

fn attribute(e: &BytesStart<'_>, name: &str) -> Option<String> {
    let attr = e.try_get_attribute(name).ok().flatten()?;
    Some(unescape_lossy(&String::from_utf8_lossy(&attr.value)).into_owned())
}

/// Unescape XML entities. An entity that cannot be resolved (`&nbsp;`) is
/// kept verbatim; the rest of the text is still unescaped.
fn unescape_lossy(raw: &str) -> Cow<'_, str> {
    if let Ok(value) = unescape(raw) {
        return value;
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let end = tail[1..]
            .find(|c: char| c == ';' || c == '&' || c.is_whitespace())
            .map(|i| i + 1)
            .filter(|&i| tail.as_bytes()[i] == b';');
        match end {
            Some(end) => {
                let entity = &tail[..=end];
                match unescape(entity) {
                    Ok(value) => out.push_str(&value),
                    Err(_) => out.push_str(entity),
                }
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}
