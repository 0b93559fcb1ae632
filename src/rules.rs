use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Profit multipliers paid on a winning stake. The stake itself is returned on top.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payouts {
    pub player: Decimal,
    pub banker: Decimal,
    /// Banker win with a final score of 6.
    pub banker_super_six: Decimal,
    pub tie: Decimal,
    pub pair: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaccaratRules {
    pub decks: u32,
    /// Reshuffle before a deal when fewer cards than this remain.
    pub reshuffle_at_cards: usize,
    /// Minimum total stake across all positions needed to deal.
    pub min_bet: Decimal,
    /// Maximum cumulative stake on any single position.
    pub max_bet: Decimal,
    pub payouts: Payouts,
}

/// Chip denominations offered to players. Not enforced by the table.
pub const CHIP_VALUES: [u32; 6] = [1, 5, 25, 100, 500, 1000];

/// Most cards a single round can consume.
pub const MAX_CARDS_PER_ROUND: usize = 6;

/// No-commission Super 6 baccarat dealt from an eight-deck shoe.
pub const RULES: BaccaratRules = BaccaratRules {
    decks: 8,
    reshuffle_at_cards: 20,
    min_bet: dec!(5),
    max_bet: dec!(5000),
    payouts: Payouts {
        player: dec!(1),
        banker: dec!(1),
        banker_super_six: dec!(0.5),
        tie: dec!(8),
        pair: dec!(11),
    },
};

impl Default for BaccaratRules {
    fn default() -> Self {
        RULES
    }
}
