// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Play log queries.
//!
//! Plays are upserted by `play_id`; the participant rows of an upserted play
//! are rewritten so seat order always matches the latest remote version.

use chrono::NaiveDate;
use rusqlite::params;
use rusqlite::types::Type;

use meeple_core::{Play, Player, SyncError};

use crate::database::Database;

/// Insert or update plays by id, leaving unrelated rows untouched.
pub async fn upsert_plays(db: &Database, plays: &[Play]) -> Result<(), SyncError> {
    let plays = plays.to_vec();
    db.connection()
        .call(move |conn| -> Result<(), tokio_rusqlite::Error> {
            let tx = conn.transaction()?;
            {
                let mut upsert = tx.prepare(
                    "INSERT INTO plays
                         (play_id, date, quantity, length_minutes, incomplete,
                          location, game_id, game_name, comments)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                     ON CONFLICT (play_id) DO UPDATE SET
                         date = excluded.date,
                         quantity = excluded.quantity,
                         length_minutes = excluded.length_minutes,
                         incomplete = excluded.incomplete,
                         location = excluded.location,
                         game_id = excluded.game_id,
                         game_name = excluded.game_name,
                         comments = excluded.comments",
                )?;
                let mut clear_players =
                    tx.prepare("DELETE FROM play_players WHERE play_id = ?1")?;
                let mut insert_player = tx.prepare(
                    "INSERT INTO play_players
                         (play_id, position, name, username, user_id,
                          start_position, color, score, win)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                )?;

                for play in &plays {
                    upsert.execute(params![
                        play.play_id,
                        play.date.to_string(),
                        play.quantity,
                        play.length_minutes,
                        play.incomplete,
                        play.location,
                        play.game_id,
                        play.game_name,
                        play.comments,
                    ])?;
                    clear_players.execute(params![play.play_id])?;
                    for (position, player) in play.players.iter().enumerate() {
                        insert_player.execute(params![
                            play.play_id,
                            position as i64,
                            player.name,
                            player.username,
                            player.user_id,
                            player.start_position,
                            player.color,
                            player.score,
                            player.win,
                        ])?;
                    }
                }
            }
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All stored plays, most recent first, with participants in seat order.
pub async fn plays(db: &Database) -> Result<Vec<Play>, SyncError> {
    db.connection()
        .call(|conn| -> Result<Vec<Play>, tokio_rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT play_id, date, quantity, length_minutes, incomplete,
                        location, game_id, game_name, comments
                 FROM plays ORDER BY date DESC, play_id DESC",
            )?;
            let rows = stmt.query_map([], |row| {
                let date: String = row.get(1)?;
                let date = date.parse::<NaiveDate>().map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e))
                })?;
                Ok(Play {
                    play_id: row.get(0)?,
                    date,
                    quantity: row.get(2)?,
                    length_minutes: row.get(3)?,
                    incomplete: row.get(4)?,
                    location: row.get(5)?,
                    game_id: row.get(6)?,
                    game_name: row.get(7)?,
                    comments: row.get(8)?,
                    players: Vec::new(),
                })
            })?;
            let mut plays = Vec::new();
            for row in rows {
                plays.push(row?);
            }

            let mut player_stmt = conn.prepare(
                "SELECT name, username, user_id, start_position, color, score, win
                 FROM play_players WHERE play_id = ?1 ORDER BY position",
            )?;
            for play in &mut plays {
                let rows = player_stmt.query_map(params![play.play_id], |row| {
                    Ok(Player {
                        name: row.get(0)?,
                        username: row.get(1)?,
                        user_id: row.get(2)?,
                        start_position: row.get(3)?,
                        color: row.get(4)?,
                        score: row.get(5)?,
                        win: row.get(6)?,
                    })
                })?;
                for row in rows {
                    play.players.push(row?);
                }
            }

            Ok(plays)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    fn player(name: &str, win: bool) -> Player {
        Player {
            name: name.to_string(),
            username: Some(name.to_lowercase()),
            user_id: Some(77),
            start_position: Some("1".into()),
            color: Some("red".into()),
            score: Some("42*".into()),
            win,
        }
    }

    fn play(play_id: i64, date: &str, players: Vec<Player>) -> Play {
        Play {
            play_id,
            date: date.parse().unwrap(),
            quantity: 1,
            length_minutes: Some(90),
            incomplete: false,
            location: Some("Home".into()),
            game_id: 13,
            game_name: "Catan".into(),
            comments: None,
            players,
        }
    }

    #[tokio::test]
    async fn upsert_and_read_round_trips_players_in_seat_order() {
        let (db, _dir) = setup_db().await;
        let stored = play(
            1,
            "2024-03-01",
            vec![player("Alice", true), player("Bob", false)],
        );

        upsert_plays(&db, std::slice::from_ref(&stored)).await.unwrap();
        let read = plays(&db).await.unwrap();
        assert_eq!(read, vec![stored]);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn plays_come_back_most_recent_first() {
        let (db, _dir) = setup_db().await;
        upsert_plays(
            &db,
            &[
                play(1, "2024-01-01", vec![]),
                play(2, "2024-03-01", vec![]),
                play(3, "2024-02-01", vec![]),
            ],
        )
        .await
        .unwrap();

        let read = plays(&db).await.unwrap();
        let ids: Vec<i64> = read.iter().map(|p| p.play_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn upsert_updates_in_place_and_rewrites_players() {
        let (db, _dir) = setup_db().await;
        upsert_plays(
            &db,
            &[play(
                1,
                "2024-01-01",
                vec![player("Alice", false), player("Bob", true)],
            )],
        )
        .await
        .unwrap();

        // Same play corrected remotely: new date, one player dropped.
        let corrected = play(1, "2024-01-02", vec![player("Alice", true)]);
        upsert_plays(&db, std::slice::from_ref(&corrected))
            .await
            .unwrap();

        let read = plays(&db).await.unwrap();
        assert_eq!(read, vec![corrected]);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn upsert_leaves_unrelated_plays_alone() {
        let (db, _dir) = setup_db().await;
        upsert_plays(&db, &[play(1, "2024-01-01", vec![]), play(2, "2024-01-02", vec![])])
            .await
            .unwrap();
        upsert_plays(&db, &[play(3, "2024-01-03", vec![])])
            .await
            .unwrap();

        let read = plays(&db).await.unwrap();
        assert_eq!(read.len(), 3);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn anonymous_player_fields_round_trip_as_null() {
        let (db, _dir) = setup_db().await;
        let anon = Player {
            name: "Guest".into(),
            username: None,
            user_id: None,
            start_position: None,
            color: None,
            score: None,
            win: false,
        };
        let stored = play(1, "2024-05-05", vec![anon.clone()]);

        upsert_plays(&db, std::slice::from_ref(&stored)).await.unwrap();
        let read = plays(&db).await.unwrap();
        assert_eq!(read[0].players, vec![anon]);

        db.close().await.unwrap();
    }
}
