// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Streaming parser for the play-history export schema.
//!
//! Consumes `<play>` elements, each with a nested game reference, an
//! optional comments block, and an optional player list. A play without a
//! resolvable game (or id, or date) is discarded whole; a player without a
//! name is discarded alone.

use chrono::NaiveDate;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tokio::io::AsyncBufRead;
use tracing::trace;

use meeple_core::{Play, Player, SyncError};

use super::{attr_flag, attr_i64, attr_non_blank, attr_str, attr_u32, map_xml_err, non_blank};

/// Mutable state for one `<play>` element's lifetime.
#[derive(Default)]
struct PlayDraft {
    play_id: Option<i64>,
    date: Option<NaiveDate>,
    quantity: u32,
    length_minutes: Option<u32>,
    incomplete: bool,
    location: Option<String>,
    game_id: Option<i64>,
    game_name: Option<String>,
    comments: Option<String>,
    players: Vec<Player>,
}

impl PlayDraft {
    fn from_start(e: &BytesStart<'_>) -> Self {
        Self {
            play_id: attr_i64(e, "id"),
            date: attr_str(e, "date")
                .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()),
            // Absent or unparsable quantity defaults to one play.
            quantity: attr_u32(e, "quantity").unwrap_or(1).max(1),
            // A reported zero length means "not recorded".
            length_minutes: attr_u32(e, "length").filter(|len| *len != 0),
            incomplete: attr_flag(e, "incomplete"),
            location: attr_non_blank(e, "location"),
            ..Self::default()
        }
    }

    fn finalize(self) -> Option<Play> {
        let play_id = self.play_id?;
        let date = self.date?;
        let game_id = self.game_id?;
        let game_name = self.game_name?;
        Some(Play {
            play_id,
            date,
            quantity: self.quantity,
            length_minutes: self.length_minutes,
            incomplete: self.incomplete,
            location: self.location,
            game_id,
            game_name,
            comments: self.comments,
            players: self.players,
        })
    }
}

fn player_from_start(e: &BytesStart<'_>) -> Option<Player> {
    // A player with no name is skipped; the surrounding play survives.
    let name = attr_non_blank(e, "name")?;
    Some(Player {
        name,
        username: attr_non_blank(e, "username"),
        // The remote service reports userid="0" for unlinked guests.
        user_id: attr_i64(e, "userid").filter(|id| *id != 0),
        start_position: attr_non_blank(e, "startposition"),
        color: attr_non_blank(e, "color"),
        score: attr_non_blank(e, "score"),
        win: attr_flag(e, "win"),
    })
}

/// Parses one page of the play-history export, preserving remote order.
pub async fn parse<R>(input: R) -> Result<Vec<Play>, SyncError>
where
    R: AsyncBufRead + Unpin,
{
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut plays = Vec::new();
    let mut current: Option<PlayDraft> = None;
    let mut in_comments = false;

    loop {
        match reader.read_event_into_async(&mut buf).await.map_err(map_xml_err)? {
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"play" => {
                    // A self-closed <play/> has no end event; settle any
                    // stale draft before starting the next one.
                    if let Some(stale) = current.take() {
                        match stale.finalize() {
                            Some(play) => plays.push(play),
                            None => trace!("dropping play missing id, date, or game"),
                        }
                    }
                    current = Some(PlayDraft::from_start(&e));
                }
                b"item" => {
                    if let Some(draft) = current.as_mut() {
                        draft.game_id = attr_i64(&e, "objectid");
                        draft.game_name = attr_non_blank(&e, "name");
                    }
                }
                b"comments" if current.is_some() => in_comments = true,
                b"player" => {
                    if let Some(draft) = current.as_mut() {
                        match player_from_start(&e) {
                            Some(player) => draft.players.push(player),
                            None => trace!("skipping player with no name"),
                        }
                    }
                }
                // players wrapper, subtypes, future elements: skipped.
                _ => {}
            },
            Event::Text(t) => {
                if in_comments {
                    if let Some(draft) = current.as_mut() {
                        // Undecodable comment text degrades to "absent".
                        if let Ok(text) = t.unescape() {
                            draft.comments = non_blank(text.into_owned());
                        }
                    }
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"play" => {
                    if let Some(draft) = current.take() {
                        match draft.finalize() {
                            Some(play) => plays.push(play),
                            None => trace!("dropping play missing id, date, or game"),
                        }
                    }
                    in_comments = false;
                }
                b"comments" => in_comments = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(plays)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn parse_str(xml: &str) -> Vec<Play> {
        parse(xml.as_bytes()).await.unwrap()
    }

    #[tokio::test]
    async fn parses_full_play_with_players() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
            <plays username="bob" userid="123" total="1" page="1">
              <play id="51" date="2024-03-01" quantity="2" length="60" incomplete="0" nowinstats="0" location="Home">
                <item name="Catan" objecttype="thing" objectid="13">
                  <subtypes><subtype value="boardgame"/></subtypes>
                </item>
                <comments>Tight endgame</comments>
                <players>
                  <player username="bob" userid="123" name="Bob" startposition="1" color="red" score="10" new="0" rating="0" win="1"/>
                  <player username="" userid="0" name="Guest" startposition="" color="" score="" new="0" rating="0" win="0"/>
                </players>
              </play>
            </plays>"#;

        let plays = parse_str(xml).await;
        assert_eq!(plays.len(), 1);
        let play = &plays[0];
        assert_eq!(play.play_id, 51);
        assert_eq!(play.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(play.quantity, 2);
        assert_eq!(play.length_minutes, Some(60));
        assert!(!play.incomplete);
        assert_eq!(play.location.as_deref(), Some("Home"));
        assert_eq!(play.game_id, 13);
        assert_eq!(play.game_name, "Catan");
        assert_eq!(play.comments.as_deref(), Some("Tight endgame"));

        assert_eq!(play.players.len(), 2);
        let bob = &play.players[0];
        assert_eq!(bob.name, "Bob");
        assert_eq!(bob.username.as_deref(), Some("bob"));
        assert_eq!(bob.user_id, Some(123));
        assert_eq!(bob.color.as_deref(), Some("red"));
        assert_eq!(bob.score.as_deref(), Some("10"));
        assert!(bob.win);

        let guest = &play.players[1];
        assert_eq!(guest.name, "Guest");
        assert!(guest.username.is_none());
        assert!(guest.user_id.is_none());
        assert!(guest.start_position.is_none());
        assert!(guest.color.is_none());
        assert!(guest.score.is_none());
        assert!(!guest.win);
    }

    #[tokio::test]
    async fn zero_length_and_blank_location_normalize_to_absent() {
        let xml = r#"
            <plays total="1">
              <play id="60" date="2024-04-02" quantity="1" length="0" incomplete="0" location="">
                <item name="Azul" objectid="230802"/>
              </play>
            </plays>"#;

        let plays = parse_str(xml).await;
        assert_eq!(plays.len(), 1);
        assert!(plays[0].length_minutes.is_none());
        assert!(plays[0].location.is_none());
    }

    #[tokio::test]
    async fn play_without_game_reference_is_dropped() {
        let xml = r#"
            <plays total="2">
              <play id="70" date="2024-04-03" quantity="1"></play>
              <play id="71" date="2024-04-03" quantity="1">
                <item name="Root" objectid="237182"/>
              </play>
            </plays>"#;

        let plays = parse_str(xml).await;
        assert_eq!(plays.len(), 1);
        assert_eq!(plays[0].play_id, 71);
    }

    #[tokio::test]
    async fn play_without_date_or_id_is_dropped() {
        let xml = r#"
            <plays total="2">
              <play id="80" date="someday">
                <item name="Root" objectid="237182"/>
              </play>
              <play date="2024-04-04">
                <item name="Root" objectid="237182"/>
              </play>
            </plays>"#;

        assert!(parse_str(xml).await.is_empty());
    }

    #[tokio::test]
    async fn nameless_player_is_skipped_but_play_survives() {
        let xml = r#"
            <plays total="1">
              <play id="90" date="2024-04-05">
                <item name="Wingspan" objectid="266192"/>
                <players>
                  <player username="" name="" score="12" win="1"/>
                  <player name="Ada" win="0"/>
                </players>
              </play>
            </plays>"#;

        let plays = parse_str(xml).await;
        assert_eq!(plays.len(), 1);
        assert_eq!(plays[0].players.len(), 1);
        assert_eq!(plays[0].players[0].name, "Ada");
    }

    #[tokio::test]
    async fn blank_comments_normalize_to_absent() {
        let xml = r#"
            <plays total="1">
              <play id="91" date="2024-04-06">
                <item name="Wingspan" objectid="266192"/>
                <comments>   </comments>
              </play>
            </plays>"#;

        let plays = parse_str(xml).await;
        assert_eq!(plays.len(), 1);
        assert!(plays[0].comments.is_none());
    }

    #[tokio::test]
    async fn missing_quantity_defaults_to_one() {
        let xml = r#"
            <plays total="1">
              <play id="92" date="2024-04-07" quantity="garbage">
                <item name="Cascadia" objectid="295947"/>
              </play>
            </plays>"#;

        let plays = parse_str(xml).await;
        assert_eq!(plays[0].quantity, 1);
    }

    #[tokio::test]
    async fn remote_order_is_preserved() {
        let xml = r#"
            <plays total="3">
              <play id="3" date="2024-01-03"><item name="A" objectid="1"/></play>
              <play id="1" date="2024-01-01"><item name="B" objectid="2"/></play>
              <play id="2" date="2024-01-02"><item name="C" objectid="3"/></play>
            </plays>"#;

        let ids: Vec<i64> = parse_str(xml).await.iter().map(|p| p.play_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
