//! Two-card blackjack.
//!
//! A 52-card deck is built suit-major, shuffled with a Fisher-Yates pass
//! driven by the seed, and dealt alternately: the player takes cards 0 and 2,
//! the dealer cards 1 and 3. Nobody draws further.

use serde::Serialize;

use crate::rng::seeded_random;

pub const DECK_SIZE: usize = 52;
pub const BLACKJACK: u32 = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Suit {
    #[serde(rename = "♠")]
    Spades,
    #[serde(rename = "♥")]
    Hearts,
    #[serde(rename = "♦")]
    Diamonds,
    #[serde(rename = "♣")]
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rank {
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
    #[serde(rename = "A")]
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
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

    /// Aces always count 11; there is no soft-hand demotion.
    pub fn points(self) -> u32 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Ace => 11,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Card {
    pub suit: Suit,
    #[serde(rename = "value")]
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandResult {
    Blackjack,
    Win,
    Push,
    Lose,
}

impl HandResult {
    pub fn multiplier(self) -> f64 {
        match self {
            HandResult::Blackjack => 2.5,
            HandResult::Win => 2.0,
            HandResult::Push => 1.0,
            HandResult::Lose => 0.0,
        }
    }

    /// [`multiplier`](Self::multiplier) as `(numerator, denominator)`.
    pub fn payout_ratio(self) -> (u64, u64) {
        match self {
            HandResult::Blackjack => (5, 2),
            HandResult::Win => (2, 1),
            HandResult::Push => (1, 1),
            HandResult::Lose => (0, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlackjackOutcome {
    pub player_hand: [Card; 2],
    pub dealer_hand: [Card; 2],
    pub player_score: u32,
    pub dealer_score: u32,
    pub result: HandResult,
    #[serde(serialize_with = "crate::number::serialize")]
    pub multiplier: f64,
}

/// Unshuffled deck: every rank of spades, then hearts, diamonds, clubs.
pub fn new_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(suit, rank)))
        .collect()
}

pub fn shuffled_deck(seed: &str) -> Vec<Card> {
    let mut deck = new_deck();
    for i in (1..deck.len()).rev() {
        let j = (seeded_random(seed, i as u32) * (i + 1) as f64).floor() as usize;
        deck.swap(i, j);
    }
    deck
}

pub fn hand_score(hand: &[Card]) -> u32 {
    hand.iter().map(|card| card.rank.points()).sum()
}

fn judge(player: u32, dealer: u32) -> HandResult {
    if player == BLACKJACK {
        HandResult::Blackjack
    } else if player > dealer || dealer > BLACKJACK {
        HandResult::Win
    } else if player == dealer {
        HandResult::Push
    } else {
        HandResult::Lose
    }
}

pub fn resolve_blackjack(seed: &str) -> BlackjackOutcome {
    let deck = shuffled_deck(seed);
    let player_hand = [deck[0], deck[2]];
    let dealer_hand = [deck[1], deck[3]];
    let player_score = hand_score(&player_hand);
    let dealer_score = hand_score(&dealer_hand);
    let result = judge(player_score, dealer_score);

    BlackjackOutcome {
        player_hand,
        dealer_hand,
        player_score,
        dealer_score,
        result,
        multiplier: result.multiplier(),
    }
}
