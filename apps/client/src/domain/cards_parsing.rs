//! Card identity strings ("Ace Spades") and the coordinator's compact tokens ("A", "♠")

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use super::cards_types::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

impl Rank {
    pub fn name(self) -> &'static str {
        match self {
            Rank::Two => "Two",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        }
    }

    /// Compact token used by the coordinator ("2".."10", "J", "Q", "K", "A").
    pub fn token(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        let rank = match token {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return None,
        };
        Some(rank)
    }
}

impl Suit {
    pub fn name(self) -> &'static str {
        match self {
            Suit::Spades => "Spades",
            Suit::Clubs => "Clubs",
            Suit::Diamonds => "Diamonds",
            Suit::Hearts => "Hearts",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "♠",
            Suit::Clubs => "♣",
            Suit::Diamonds => "♦",
            Suit::Hearts => "♥",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let suit = match symbol {
            "♠" => Suit::Spades,
            "♣" => Suit::Clubs,
            "♦" => Suit::Diamonds,
            "♥" => Suit::Hearts,
            _ => return None,
        };
        Some(suit)
    }
}

impl FromStr for Rank {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rank = match s {
            "Two" => Rank::Two,
            "Three" => Rank::Three,
            "Four" => Rank::Four,
            "Five" => Rank::Five,
            "Six" => Rank::Six,
            "Seven" => Rank::Seven,
            "Eight" => Rank::Eight,
            "Nine" => Rank::Nine,
            "Ten" => Rank::Ten,
            "Jack" => Rank::Jack,
            "Queen" => Rank::Queen,
            "King" => Rank::King,
            "Ace" => Rank::Ace,
            _ => {
                return Err(DomainError::validation(
                    ValidationKind::ParseRank,
                    format!("Invalid rank: {s}"),
                ))
            }
        };
        Ok(rank)
    }
}

impl FromStr for Suit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let suit = match s {
            "Spades" => Suit::Spades,
            "Clubs" => Suit::Clubs,
            "Diamonds" => Suit::Diamonds,
            "Hearts" => Suit::Hearts,
            _ => {
                return Err(DomainError::validation(
                    ValidationKind::ParseSuit,
                    format!("Invalid suit: {s}"),
                ))
            }
        };
        Ok(suit)
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

impl Display for Suit {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

/// Identity string `"<rank> <suit>"`, e.g. `"Queen Hearts"`.
impl Display for Card {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err =
            || DomainError::validation(ValidationKind::ParseCard, format!("Parse card: {s}"));

        let (rank, suit) = s.split_once(' ').ok_or_else(parse_err)?;
        let rank = rank.parse::<Rank>().map_err(|_| parse_err())?;
        let suit = suit.parse::<Suit>().map_err(|_| parse_err())?;
        Ok(Card { rank, suit })
    }
}

/// Stable identity used as display label and selection key.
pub fn encode(card: &Card) -> String {
    card.to_string()
}

/// Inverse of [`encode`]; rejects anything that is not exactly `"<Rank> <Suit>"`.
pub fn decode(identity: &str) -> Result<Card, DomainError> {
    identity.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_uses_rank_then_suit_names() {
        assert_eq!(encode(&Card::new(Rank::Ace, Suit::Spades)), "Ace Spades");
        assert_eq!(encode(&Card::new(Rank::Ten, Suit::Hearts)), "Ten Hearts");
    }

    #[test]
    fn decode_parses_identity() {
        assert_eq!(
            decode("Queen Diamonds").unwrap(),
            Card::new(Rank::Queen, Suit::Diamonds)
        );
    }

    #[test]
    fn decode_rejects_malformed_identities() {
        for bad in [
            "",
            "Ace",
            "AceSpades",
            "Ace  Spades",
            "ace spades",
            "Spades Ace",
            "One Spades",
            "Ace Swords",
            "Ace Spades extra",
            "A ♠",
        ] {
            let err = decode(bad).unwrap_err();
            assert_eq!(err.kind(), ValidationKind::ParseCard, "input {bad:?}");
        }
    }

    #[test]
    fn compact_tokens_cover_every_rank_and_suit() {
        for rank in crate::domain::cards_types::ALL_RANKS {
            assert_eq!(Rank::from_token(rank.token()), Some(rank));
        }
        for suit in crate::domain::cards_types::ALL_SUITS {
            assert_eq!(Suit::from_symbol(suit.symbol()), Some(suit));
        }
        assert_eq!(Rank::from_token("1"), None);
        assert_eq!(Suit::from_symbol("S"), None);
    }
}
