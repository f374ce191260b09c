//! Core card-related types: Card, Rank, Suit

/// Suit in canonical order: Spades < Clubs < Diamonds < Hearts.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Spades,
    Clubs,
    Diamonds,
    Hearts,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

pub const ALL_SUITS: [Suit; 4] = [Suit::Spades, Suit::Clubs, Suit::Diamonds, Suit::Hearts];

pub const ALL_RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

pub const NUMBER_OF_CARDS: usize = ALL_SUITS.len() * ALL_RANKS.len();

impl Suit {
    /// 0-based position: Spades=0, Clubs=1, Diamonds=2, Hearts=3
    pub fn index(self) -> u8 {
        self as u8
    }
}

impl Rank {
    /// 0-based position: Two=0 .. Ace=12
    pub fn index(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Canonical order key `suit_index * 13 + rank_index`, unique per card in `0..52`.
    ///
    /// This is the only ordering used for sorting hands and boards and for
    /// addressing a card in the visual index. Grouping by rank first
    /// (`rank_index * 4 + suit_index`) is not supported anywhere.
    pub fn order_key(self) -> u8 {
        self.suit.index() * ALL_RANKS.len() as u8 + self.rank.index()
    }

    /// Every card of the deck in canonical order.
    pub fn all() -> impl Iterator<Item = Card> {
        ALL_SUITS
            .into_iter()
            .flat_map(|suit| ALL_RANKS.into_iter().map(move |rank| Card { rank, suit }))
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.order_key().cmp(&other.order_key())
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Canonical comparison; equivalent to `a.cmp(&b)`.
pub fn compare(a: &Card, b: &Card) -> std::cmp::Ordering {
    a.cmp(b)
}

/// Sorts cards by the canonical order key and drops duplicates.
pub fn canonical(cards: impl IntoIterator<Item = Card>) -> Vec<Card> {
    let mut out: Vec<Card> = cards.into_iter().collect();
    out.sort_unstable();
    out.dedup();
    out
}
