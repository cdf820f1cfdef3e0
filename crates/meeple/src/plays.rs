// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `meeple plays` command implementation.

use meeple_config::model::MeepleConfig;
use meeple_core::{LocalStore, Play};
use meeple_storage::SqliteStore;

/// One display line: date, quantity, game, and winners when known.
fn format_play(play: &Play) -> String {
    let quantity = if play.quantity > 1 {
        format!(" x{}", play.quantity)
    } else {
        String::new()
    };
    let winners: Vec<&str> = play
        .players
        .iter()
        .filter(|p| p.win)
        .map(|p| p.name.as_str())
        .collect();
    let won = if winners.is_empty() {
        String::new()
    } else {
        format!("  won by {}", winners.join(", "))
    };
    let incomplete = if play.incomplete { "  (incomplete)" } else { "" };
    format!(
        "  {}  {}{quantity}{won}{incomplete}",
        play.date, play.game_name
    )
}

/// Run the `meeple plays` command.
pub async fn run_plays(
    config: &MeepleConfig,
    limit: usize,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open(&config.storage.database_path).await?;
    let mut plays = store.plays().await?;
    store.close().await?;

    let total = plays.len();
    plays.truncate(limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&plays)?);
        return Ok(());
    }

    if plays.is_empty() {
        println!("No plays synced yet. Run: meeple sync");
        return Ok(());
    }

    for play in &plays {
        println!("{}", format_play(play));
    }
    if total > plays.len() {
        println!("{} of {total} plays (use --limit to show more)", plays.len());
    } else {
        println!("{total} plays");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use meeple_core::Player;

    fn play(game: &str, quantity: u32, incomplete: bool, winners: &[&str]) -> Play {
        Play {
            play_id: 1,
            date: "2024-05-01".parse().unwrap(),
            quantity,
            length_minutes: None,
            incomplete,
            location: None,
            game_id: 13,
            game_name: game.to_string(),
            comments: None,
            players: winners
                .iter()
                .map(|name| Player {
                    name: name.to_string(),
                    username: None,
                    user_id: None,
                    start_position: None,
                    color: None,
                    score: None,
                    win: true,
                })
                .collect(),
        }
    }

    #[test]
    fn single_play_line_is_minimal() {
        let line = format_play(&play("Catan", 1, false, &[]));
        assert_eq!(line, "  2024-05-01  Catan");
    }

    #[test]
    fn quantity_and_winners_are_shown() {
        let line = format_play(&play("Azul", 3, false, &["Alice", "Bob"]));
        assert_eq!(line, "  2024-05-01  Azul x3  won by Alice, Bob");
    }

    #[test]
    fn incomplete_plays_are_marked() {
        let line = format_play(&play("Twilight Imperium", 1, true, &[]));
        assert_eq!(line, "  2024-05-01  Twilight Imperium  (incomplete)");
    }
}
