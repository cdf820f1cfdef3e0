// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Streaming XML-to-domain parsers.
//!
//! Both schemas are parsed event-by-event over `quick-xml`'s async reader;
//! no document tree is ever materialized. Field-level damage (a missing or
//! malformed attribute, unparsable text) degrades to "absent" for that field
//! rather than aborting the parse; a record missing its required fields is
//! discarded whole when its element closes.

pub mod collection;
pub mod plays;

use quick_xml::events::BytesStart;

use meeple_core::SyncError;

pub(crate) fn map_xml_err(e: quick_xml::Error) -> SyncError {
    SyncError::Parse {
        message: format!("malformed XML stream: {e}"),
    }
}

/// Attribute text, or `None` when the attribute is missing or undecodable.
pub(crate) fn attr_str(e: &BytesStart<'_>, name: &str) -> Option<String> {
    e.try_get_attribute(name)
        .ok()
        .flatten()
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.into_owned())
}

/// Attribute text with blank normalized to absent.
pub(crate) fn attr_non_blank(e: &BytesStart<'_>, name: &str) -> Option<String> {
    attr_str(e, name).and_then(non_blank)
}

pub(crate) fn attr_i64(e: &BytesStart<'_>, name: &str) -> Option<i64> {
    attr_str(e, name).and_then(|s| s.trim().parse().ok())
}

pub(crate) fn attr_u32(e: &BytesStart<'_>, name: &str) -> Option<u32> {
    attr_str(e, name).and_then(|s| s.trim().parse().ok())
}

/// Boolean attribute in the remote service's "0"/"1" convention.
pub(crate) fn attr_flag(e: &BytesStart<'_>, name: &str) -> bool {
    attr_str(e, name).is_some_and(|s| s.trim() == "1")
}

/// Blank-to-absent normalization used for every optional text field.
pub(crate) fn non_blank(s: String) -> Option<String> {
    if s.trim().is_empty() { None } else { Some(s) }
}
