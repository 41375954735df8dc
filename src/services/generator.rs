// src/services/generator.rs

//! RSS 2.0 serialization of show and aggregate feeds.
//!
//! Output is a pure function of the channel metadata and the episode
//! sequence, so identical input always produces byte-identical XML.

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;

use super::title::format_title;
use crate::error::Result;
use crate::models::{ChannelConfig, Episode, FeedDocument};

/// Builds feed documents with a fixed channel configuration.
#[derive(Debug, Clone, Default)]
pub struct FeedGenerator {
    channel: ChannelConfig,
}

impl FeedGenerator {
    pub fn new(channel: ChannelConfig) -> Self {
        Self { channel }
    }

    pub fn channel(&self) -> &ChannelConfig {
        &self.channel
    }

    /// Feed document for one show, titled from its slug.
    pub fn show_document(&self, slug: &str, episodes: &[Episode]) -> FeedDocument {
        let title = format_title(slug);
        FeedDocument {
            description: self.channel.describe_show(&title),
            title,
            link: self.channel.link.clone(),
            episodes: episodes.to_vec(),
        }
    }

    /// Feed document over every episode, in the order given.
    pub fn all_shows_document(&self, episodes: &[Episode]) -> FeedDocument {
        FeedDocument {
            title: self.channel.all_shows_title.clone(),
            link: self.channel.link.clone(),
            description: self.channel.all_shows_description.clone(),
            episodes: episodes.to_vec(),
        }
    }

    pub fn show_feed(&self, slug: &str, episodes: &[Episode]) -> Result<String> {
        render(&self.show_document(slug, episodes))
    }

    pub fn all_shows_feed(&self, episodes: &[Episode]) -> Result<String> {
        render(&self.all_shows_document(episodes))
    }
}

/// Serialize a show's episodes with the default channel configuration.
pub fn generate_show_feed(slug: &str, episodes: &[Episode]) -> Result<String> {
    FeedGenerator::default().show_feed(slug, episodes)
}

/// Serialize all episodes with the default channel configuration.
pub fn generate_all_shows_feed(episodes: &[Episode]) -> Result<String> {
    FeedGenerator::default().all_shows_feed(episodes)
}

/// Serialize a feed document as RSS 2.0.
pub fn render(document: &FeedDocument) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("rss").with_attributes([("version", "2.0")]),
    ))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    write_text_element(&mut writer, "title", &document.title)?;
    write_text_element(&mut writer, "link", &document.link)?;
    write_text_element(&mut writer, "description", &document.description)?;

    for episode in &document.episodes {
        writer.write_event(Event::Start(BytesStart::new("item")))?;
        write_text_element(&mut writer, "title", &episode.title)?;
        write_text_element(&mut writer, "description", &episode.description)?;
        write_text_element(&mut writer, "link", &episode.link)?;
        write_text_element(&mut writer, "pubDate", &episode.published_at)?;
        write_text_element(&mut writer, "guid", &episode.guid)?;
        writer.write_event(Event::End(BytesEnd::new("item")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(String::from_utf8(bytes)?)
}

/// `<name>text</name>`, escaping only `<`, `>` and `&`.
fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
