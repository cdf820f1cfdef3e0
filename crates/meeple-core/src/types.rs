// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain records mirrored from the remote game-cataloging service.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Whether a collection entry is a base game or an expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subtype {
    BaseGame,
    Expansion,
}

impl Subtype {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BaseGame => "base_game",
            Self::Expansion => "expansion",
        }
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subtype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base_game" => Ok(Self::BaseGame),
            "expansion" => Ok(Self::Expansion),
            other => Err(format!("unknown subtype: {other}")),
        }
    }
}

/// One game in the user's collection.
///
/// The collection is a full snapshot: every successful collection sync
/// replaces the stored set wholesale, keyed by `game_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionItem {
    /// Remote-assigned, stable identity key.
    pub game_id: i64,
    pub subtype: Subtype,
    pub name: String,
    pub year_published: Option<i32>,
    pub thumbnail_url: Option<String>,
    /// Remote-provided modification instant, when reported.
    pub last_modified: Option<DateTime<Utc>>,
}

/// One logged play of a game.
///
/// Plays are merged by upsert on `play_id`: history is additive and
/// corrective, unlike the snapshot-replaced collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Play {
    /// Remote play id, primary key.
    pub play_id: i64,
    pub date: NaiveDate,
    /// Number of times the game was played in this entry; at least 1.
    pub quantity: u32,
    /// Play length in minutes. A remote-reported zero means "not recorded".
    pub length_minutes: Option<u32>,
    pub incomplete: bool,
    pub location: Option<String>,
    pub game_id: i64,
    pub game_name: String,
    pub comments: Option<String>,
    /// Seat order as reported by the remote service.
    pub players: Vec<Player>,
}

/// One participant in a play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    /// Remote account link, when the player is a registered user.
    pub username: Option<String>,
    pub user_id: Option<i64>,
    pub start_position: Option<String>,
    pub color: Option<String>,
    /// Kept as reported; scores are not numbers at this layer ("42*", "1st").
    pub score: Option<String>,
    pub win: bool,
}

/// Per-domain and overall sync instants, each set only after the
/// corresponding fetch and merge succeeded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncTimestamps {
    pub collection: Option<DateTime<Utc>>,
    pub plays: Option<DateTime<Utc>>,
    pub full: Option<DateTime<Utc>>,
}
