// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `meeple collection` command implementation.

use meeple_config::model::MeepleConfig;
use meeple_core::{CollectionItem, LocalStore, Subtype};
use meeple_storage::SqliteStore;

/// One display line: name, year when known, and an expansion marker.
fn format_item(item: &CollectionItem) -> String {
    let year = item
        .year_published
        .map(|y| format!(" ({y})"))
        .unwrap_or_default();
    let marker = match item.subtype {
        Subtype::BaseGame => "",
        Subtype::Expansion => "  [expansion]",
    };
    format!("  {}{year}{marker}", item.name)
}

/// Run the `meeple collection` command.
pub async fn run_collection(
    config: &MeepleConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open(&config.storage.database_path).await?;
    let items = store.collection().await?;
    store.close().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("No collection synced yet. Run: meeple sync");
        return Ok(());
    }

    for item in &items {
        println!("{}", format_item(item));
    }
    println!("{} items", items.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, year: Option<i32>, subtype: Subtype) -> CollectionItem {
        CollectionItem {
            game_id: 1,
            subtype,
            name: name.to_string(),
            year_published: year,
            thumbnail_url: None,
            last_modified: None,
        }
    }

    #[test]
    fn base_game_line_shows_name_and_year() {
        let line = format_item(&item("Catan", Some(1995), Subtype::BaseGame));
        assert_eq!(line, "  Catan (1995)");
    }

    #[test]
    fn missing_year_is_omitted() {
        let line = format_item(&item("Mystery", None, Subtype::BaseGame));
        assert_eq!(line, "  Mystery");
    }

    #[test]
    fn expansions_are_marked() {
        let line = format_item(&item("Seafarers", Some(1997), Subtype::Expansion));
        assert_eq!(line, "  Seafarers (1997)  [expansion]");
    }
}
