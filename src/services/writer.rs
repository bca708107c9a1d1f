// src/services/writer.rs

//! Atom and RSS serialization of a [`FeedRecord`].

use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use sha2::{Digest, Sha256};

use crate::error::{AppError, Result};
use crate::models::{FeedFormat, FeedItem, FeedRecord};

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// Serialize `record` in the requested format.
pub fn write_feed(record: &FeedRecord, format: FeedFormat) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;

    match format {
        FeedFormat::Atom => write_atom(&mut writer, record)?,
        FeedFormat::Rss => write_rss(&mut writer, record)?,
    }

    String::from_utf8(writer.into_inner()).map_err(AppError::serialization)
}

fn write_atom<W: Write>(writer: &mut Writer<W>, record: &FeedRecord) -> Result<()> {
    let updated = record.updated.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

    let mut feed = BytesStart::new("feed");
    feed.push_attribute(("xmlns", ATOM_NS));
    emit(writer, Event::Start(feed))?;

    text_element(writer, "title", &record.title)?;
    text_element(writer, "id", &record.link)?;
    text_element(writer, "updated", &atom_time(updated))?;
    link_element(writer, &record.link)?;

    for item in &record.items {
        emit(writer, Event::Start(BytesStart::new("entry")))?;
        text_element(writer, "title", &item.title)?;
        if let Some(link) = &item.link {
            link_element(writer, link)?;
        }
        let id = item.id.clone().unwrap_or_else(|| fallback_id(item));
        text_element(writer, "id", &id)?;
        text_element(writer, "updated", &atom_time(item.updated.unwrap_or(updated)))?;
        emit(writer, Event::End(BytesEnd::new("entry")))?;
    }

    emit(writer, Event::End(BytesEnd::new("feed")))
}

fn write_rss<W: Write>(writer: &mut Writer<W>, record: &FeedRecord) -> Result<()> {
    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    emit(writer, Event::Start(rss))?;
    emit(writer, Event::Start(BytesStart::new("channel")))?;

    text_element(writer, "title", &record.title)?;
    text_element(writer, "link", &record.link)?;
    text_element(writer, "description", &record.title)?;
    if let Some(updated) = record.updated {
        text_element(writer, "lastBuildDate", &updated.to_rfc2822())?;
    }

    for item in &record.items {
        emit(writer, Event::Start(BytesStart::new("item")))?;
        text_element(writer, "title", &item.title)?;
        if let Some(link) = &item.link {
            text_element(writer, "link", link)?;
        }
        if let Some(id) = &item.id {
            let permalink = item.link.as_deref() == Some(id.as_str());
            let mut guid = BytesStart::new("guid");
            guid.push_attribute(("isPermaLink", if permalink { "true" } else { "false" }));
            emit(writer, Event::Start(guid))?;
            emit(writer, Event::Text(BytesText::new(&sanitize_text(id))))?;
            emit(writer, Event::End(BytesEnd::new("guid")))?;
        }
        if let Some(updated) = item.updated {
            text_element(writer, "pubDate", &updated.to_rfc2822())?;
        }
        emit(writer, Event::End(BytesEnd::new("item")))?;
    }

    emit(writer, Event::End(BytesEnd::new("channel")))?;
    emit(writer, Event::End(BytesEnd::new("rss")))
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer.write_event(event).map_err(AppError::serialization)
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    emit(writer, Event::Start(BytesStart::new(name)))?;
    emit(writer, Event::Text(BytesText::new(&sanitize_text(text))))?;
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn link_element<W: Write>(writer: &mut Writer<W>, href: &str) -> Result<()> {
    let mut link = BytesStart::new("link");
    link.push_attribute(("href", href));
    link.push_attribute(("rel", "alternate"));
    emit(writer, Event::Empty(link))
}

fn atom_time(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Deterministic Atom id for an entry without link or date.
fn fallback_id(item: &FeedItem) -> String {
    let mut hasher = Sha256::new();
    hasher.update(item.title.as_bytes());
    hasher.update(b"\n");
    hasher.update(item.link.as_deref().unwrap_or_default().as_bytes());
    format!("urn:sha256:{}", hex::encode(hasher.finalize()))
}

/// Drop control characters XML 1.0 cannot carry.
fn sanitize_text(input: &str) -> String {
    input
        .chars()
        .filter(|&c| matches!(c, '\t' | '\n' | '\r') || !c.is_control())
        .collect()
}
