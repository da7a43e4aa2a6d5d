//! Tile labels as shown by the game client.
//!
//! A label is a digit followed by a suit letter: `1m`..`9m`, `1p`..`9p`,
//! `1s`..`9s` for suited tiles, `0m`/`0p`/`0s` for red fives and `1z`..`7z`
//! for honors (winds east to north, then white, green, red dragons).

use std::cmp::Ordering;

/// Parse a label into `(suit, number)`. Red fives keep number 0.
pub fn parse(label: &str) -> Option<(char, u8)> {
    let mut chars = label.chars();
    let digit = chars.next()?.to_digit(10)? as u8;
    let suit = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    match suit {
        'm' | 'p' | 's' => Some((suit, digit)),
        'z' if (1..=7).contains(&digit) => Some((suit, digit)),
        _ => None,
    }
}

pub fn is_valid(label: &str) -> bool {
    parse(label).is_some()
}

pub fn is_red(label: &str) -> bool {
    matches!(parse(label), Some((_, 0)))
}

/// Tile kind with red fives folded onto plain fives.
pub fn kind(label: &str) -> Option<(char, u8)> {
    parse(label).map(|(suit, n)| (suit, if n == 0 { 5 } else { n }))
}

/// Whether two labels denote the same kind of tile, ignoring red fives.
pub fn same_kind(a: &str, b: &str) -> bool {
    match (kind(a), kind(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

fn suit_rank(suit: char) -> u8 {
    match suit {
        'm' => 0,
        'p' => 1,
        's' => 2,
        _ => 3,
    }
}

fn sort_key(label: &str) -> (u8, u8) {
    match parse(label) {
        // Red five sorts right after the plain five.
        Some((suit, 0)) => (suit_rank(suit), 11),
        Some((suit, n)) => (suit_rank(suit), n * 2),
        None => (u8::MAX, u8::MAX),
    }
}

/// Order two labels the way the client lays out a hand.
pub fn compare(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

/// Sort a hand in place into client display order.
pub fn sort_hand(hand: &mut [String]) {
    hand.sort_by(|a, b| compare(a, b));
}
