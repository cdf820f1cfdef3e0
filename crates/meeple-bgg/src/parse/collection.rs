// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Streaming parser for the collection export schema.
//!
//! Consumes a stream of `<item>` elements inside an `<items totalitems="N">`
//! root and produces [`CollectionItem`] records. The declared total is kept
//! so the fetcher can recognize the disguised-queued shape: a 200 response
//! reporting zero total items with no item elements while the export is
//! still being prepared server-side.

use chrono::{DateTime, NaiveDateTime, Utc};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tokio::io::AsyncBufRead;
use tracing::trace;

use meeple_core::{CollectionItem, Subtype, SyncError};

use super::{attr_str, attr_u32, map_xml_err, non_blank};

/// Format of the `lastmodified` attribute on `<status>`.
const LAST_MODIFIED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A fully-consumed collection stream.
#[derive(Debug)]
pub struct ParsedCollection {
    /// The `totalitems` count the remote service declared, when parsable.
    pub declared_total: Option<u32>,
    pub items: Vec<CollectionItem>,
}

impl ParsedCollection {
    /// True for the disguised-queued shape: zero declared items and no item
    /// elements. A genuinely empty collection also matches; the remote
    /// service does not distinguish the two, so callers retry either way.
    pub fn looks_queued(&self) -> bool {
        self.declared_total == Some(0) && self.items.is_empty()
    }
}

/// Child elements whose text is accumulated into the in-progress record.
enum Field {
    Name,
    Year,
    Thumbnail,
}

/// Mutable state for one `<item>` element's lifetime. Discarded, never
/// stored, when required fields are missing at element close.
#[derive(Default)]
struct ItemDraft {
    game_id: Option<i64>,
    subtype: Option<Subtype>,
    name: Option<String>,
    year_published: Option<i32>,
    thumbnail_url: Option<String>,
    last_modified: Option<DateTime<Utc>>,
}

impl ItemDraft {
    fn from_start(e: &BytesStart<'_>) -> Self {
        Self {
            game_id: super::attr_i64(e, "objectid"),
            subtype: attr_str(e, "subtype").and_then(|s| match s.as_str() {
                "boardgameexpansion" => Some(Subtype::Expansion),
                "boardgame" => Some(Subtype::BaseGame),
                _ => None,
            }),
            ..Self::default()
        }
    }

    fn finalize(self, force_subtype: Option<Subtype>) -> Option<CollectionItem> {
        let game_id = self.game_id?;
        let name = self.name?;
        Some(CollectionItem {
            game_id,
            subtype: force_subtype
                .or(self.subtype)
                .unwrap_or(Subtype::BaseGame),
            name,
            year_published: self.year_published,
            thumbnail_url: self.thumbnail_url,
            last_modified: self.last_modified,
        })
    }
}

/// Parses a collection export stream.
///
/// `force_subtype` overrides the per-item subtype attribute for streams known
/// to be subtype-homogeneous (each collection sub-fetch requests exactly one
/// subtype, and the remote service's own attribute is not always reliable).
pub async fn parse<R>(
    input: R,
    force_subtype: Option<Subtype>,
) -> Result<ParsedCollection, SyncError>
where
    R: AsyncBufRead + Unpin,
{
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut declared_total = None;
    let mut items = Vec::new();
    let mut current: Option<ItemDraft> = None;
    let mut field: Option<Field> = None;
    // Depth of `<item>` elements nested inside the current record (version
    // blocks and the like); everything below them is ignored wholesale.
    let mut nested_items = 0usize;

    loop {
        match reader.read_event_into_async(&mut buf).await.map_err(map_xml_err)? {
            Event::Start(e) if nested_items > 0 => {
                if e.local_name().as_ref() == b"item" {
                    nested_items += 1;
                }
            }
            Event::Start(e) => match e.local_name().as_ref() {
                b"items" => declared_total = attr_u32(&e, "totalitems"),
                b"item" if current.is_none() => current = Some(ItemDraft::from_start(&e)),
                b"item" => nested_items += 1,
                b"name" if current.is_some() => field = Some(Field::Name),
                b"yearpublished" if current.is_some() => field = Some(Field::Year),
                b"thumbnail" if current.is_some() => field = Some(Field::Thumbnail),
                b"status" => apply_status(&e, current.as_mut()),
                // Unknown siblings (image, numplays, stats, ...) are skipped.
                _ => field = None,
            },
            Event::Empty(_) if nested_items > 0 => {}
            Event::Empty(e) => match e.local_name().as_ref() {
                b"items" => declared_total = attr_u32(&e, "totalitems"),
                b"status" => apply_status(&e, current.as_mut()),
                _ => {}
            },
            Event::Text(_) if nested_items > 0 => {}
            Event::Text(t) => {
                if let (Some(draft), Some(f)) = (current.as_mut(), field.as_ref()) {
                    // Undecodable text degrades to "absent" for this field.
                    if let Ok(text) = t.unescape() {
                        let text = text.into_owned();
                        match f {
                            Field::Name => draft.name = non_blank(text),
                            Field::Year => draft.year_published = text.trim().parse().ok(),
                            Field::Thumbnail => draft.thumbnail_url = non_blank(text),
                        }
                    }
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"item" if nested_items > 0 => nested_items -= 1,
                b"item" => {
                    if let Some(draft) = current.take() {
                        match draft.finalize(force_subtype) {
                            Some(item) => items.push(item),
                            None => trace!("dropping collection item missing id or name"),
                        }
                    }
                }
                b"name" | b"yearpublished" | b"thumbnail" if nested_items == 0 => field = None,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(ParsedCollection {
        declared_total,
        items,
    })
}

fn apply_status(e: &BytesStart<'_>, current: Option<&mut ItemDraft>) {
    if let Some(draft) = current {
        draft.last_modified = attr_str(e, "lastmodified")
            .and_then(|s| NaiveDateTime::parse_from_str(&s, LAST_MODIFIED_FORMAT).ok())
            .map(|n| n.and_utc());
    }
}
