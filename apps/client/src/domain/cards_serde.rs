//! Serialization and deserialization for card types
//!
//! Cards are written as `{"rank":"Ace","suit":"Spades"}`. On input the
//! coordinator's compact tuple form `["A","♠"]` is accepted as well;
//! [`CompactCard`] writes that form for coordinators that only read it.

use std::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeStruct, SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};

use super::cards_types::{Card, Rank, Suit};

impl Serialize for Rank {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Rank {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Rank>()
            .ok()
            .or_else(|| Rank::from_token(&s))
            .ok_or_else(|| de::Error::custom(format!("Invalid rank: {s}")))
    }
}

impl Serialize for Suit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Suit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Suit>()
            .ok()
            .or_else(|| Suit::from_symbol(&s))
            .ok_or_else(|| de::Error::custom(format!("Invalid suit: {s}")))
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut st = serializer.serialize_struct("Card", 2)?;
        st.serialize_field("rank", &self.rank)?;
        st.serialize_field("suit", &self.suit)?;
        st.end()
    }
}

struct CardVisitor;

impl<'de> Visitor<'de> for CardVisitor {
    type Value = Card;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("{\"rank\": .., \"suit\": ..} or [rank, suit]")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Card, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut rank = None;
        let mut suit = None;
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "rank" => rank = Some(map.next_value::<Rank>()?),
                "suit" => suit = Some(map.next_value::<Suit>()?),
                _ => {
                    map.next_value::<de::IgnoredAny>()?;
                }
            }
        }
        let rank = rank.ok_or_else(|| de::Error::missing_field("rank"))?;
        let suit = suit.ok_or_else(|| de::Error::missing_field("suit"))?;
        Ok(Card { rank, suit })
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Card, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let rank = seq
            .next_element::<Rank>()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let suit = seq
            .next_element::<Suit>()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        Ok(Card { rank, suit })
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(CardVisitor)
    }
}

/// Wire form used for cards in outbound steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CardFormat {
    /// `{"rank":"Ace","suit":"Spades"}`
    #[default]
    Object,
    /// `["A","♠"]`
    Compact,
}

impl CardFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "object" => Some(CardFormat::Object),
            "compact" => Some(CardFormat::Compact),
            _ => None,
        }
    }
}

/// Serializes a card as the compact `[rank token, suit symbol]` tuple.
#[derive(Debug, Clone, Copy)]
pub struct CompactCard<'a>(pub &'a Card);

impl Serialize for CompactCard<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tup = serializer.serialize_tuple(2)?;
        tup.serialize_element(self.0.rank.token())?;
        tup.serialize_element(self.0.suit.symbol())?;
        tup.end()
    }
}
