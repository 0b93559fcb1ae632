use std::fmt::{Display, Formatter};

use serde::Deserialize;
use strum_macros::{Display, EnumIter};

#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, EnumIter, Display)]
pub enum Suit {
    #[strum(serialize = "♥")]
    Hearts,
    #[strum(serialize = "♦")]
    Diamonds,
    #[strum(serialize = "♣")]
    Clubs,
    #[strum(serialize = "♠")]
    Spades,
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash, EnumIter)]
pub enum Rank {
    Ace,
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
}

impl Rank {
    /// Baccarat point value of this rank: Ace is 1, pips count face value, tens and faces are 0.
    pub fn value(self) -> u8 {
        match self {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Rank::Ace => "A",
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
        }
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single playing card. `id` is unique within the shoe that produced it.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
    pub id: u32,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit, id: u32) -> Self {
        Card { rank, suit, id }
    }

    pub fn value(&self) -> u8 {
        self.rank.value()
    }
}

/// Shorthand used when the suit and identity of a card do not matter.
impl From<Rank> for Card {
    fn from(rank: Rank) -> Self {
        Card { rank, suit: Suit::Spades, id: 0 }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, Display)]
pub enum Side {
    Player,
    Banker,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, Display)]
pub enum Winner {
    #[strum(serialize = "PLAYER")]
    Player,
    #[strum(serialize = "BANKER")]
    Banker,
    #[strum(serialize = "TIE")]
    Tie,
}

impl Winner {
    /// Single-letter bead plate marker.
    pub fn bead(self) -> char {
        match self {
            Winner::Player => 'P',
            Winner::Banker => 'B',
            Winner::Tie => 'T',
        }
    }
}

/// The five fixed betting spots on the table.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, enum_map::Enum, EnumIter, Display, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetPosition {
    #[strum(serialize = "PLAYER")]
    Player,
    #[strum(serialize = "BANKER")]
    Banker,
    #[strum(serialize = "TIE")]
    Tie,
    #[strum(serialize = "PLAYER_PAIR")]
    PlayerPair,
    #[strum(serialize = "BANKER_PAIR")]
    BankerPair,
}
