//! Tile identity, deck construction and joker derivation.
//!
//! A full Okey deck is 106 tiles: 13 numbers in 4 colors, two copies of each
//! (104), plus two false jokers. Every tile carries a `unique_id` assigned at
//! deck construction so physically-distinct copies of the same face can be
//! told apart.

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DECK_SIZE: usize = 106;
pub const MIN_NUMBER: u8 = 1;
pub const MAX_NUMBER: u8 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileColor {
    Red,
    Yellow,
    Blue,
    Black,
}

impl TileColor {
    pub const ALL: [TileColor; 4] = [
        TileColor::Red,
        TileColor::Yellow,
        TileColor::Blue,
        TileColor::Black,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceType {
    Normal,
    /// Wildcard tile. Always counts as a joker regardless of the indicator.
    FalseJoker,
}

/// A single game piece. Face identity is (number, color, piece_type);
/// `unique_id` distinguishes the two physical copies of each face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// 1-13 for normal tiles, 0 for false jokers.
    pub number: u8,
    pub color: TileColor,
    pub piece_type: PieceType,
    pub unique_id: u8,
}

impl Tile {
    /// True if the two tiles show the same face, ignoring instance identity.
    pub fn same_face(&self, other: &Tile) -> bool {
        self.number == other.number
            && self.color == other.color
            && self.piece_type == other.piece_type
    }

    /// True if this tile acts as a wildcard under the given joker spec.
    pub fn is_joker(&self, joker: JokerSpec) -> bool {
        match self.piece_type {
            PieceType::FalseJoker => true,
            PieceType::Normal => match joker {
                JokerSpec::Face { number, color } => {
                    self.number == number && self.color == color
                }
                JokerSpec::WildcardOnly => false,
            },
        }
    }
}

/// Which tiles count as jokers this round, derived from the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JokerSpec {
    /// Normal tiles with this exact face are jokers (false jokers always are).
    Face { number: u8, color: TileColor },
    /// The indicator was itself a wildcard: only the false jokers are jokers.
    WildcardOnly,
}

/// Derive the joker from the indicator: next number, same color, 13 wraps
/// to 1. A wildcard indicator is its own joker.
pub fn derive_joker(indicator: &Tile) -> JokerSpec {
    if indicator.piece_type == PieceType::FalseJoker {
        return JokerSpec::WildcardOnly;
    }
    let number = if indicator.number == MAX_NUMBER {
        MIN_NUMBER
    } else {
        indicator.number + 1
    };
    JokerSpec::Face {
        number,
        color: indicator.color,
    }
}

/// Build the full 106-tile deck in deterministic pre-shuffle order:
/// color-major, then number, then copy, with the two false jokers last.
pub fn build_deck() -> Vec<Tile> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    let mut next_id: u8 = 0;
    for color in TileColor::ALL {
        for number in MIN_NUMBER..=MAX_NUMBER {
            for _copy in 0..2 {
                deck.push(Tile {
                    number,
                    color,
                    piece_type: PieceType::Normal,
                    unique_id: next_id,
                });
                next_id += 1;
            }
        }
    }
    for _ in 0..2 {
        deck.push(Tile {
            number: 0,
            color: TileColor::Black,
            piece_type: PieceType::FalseJoker,
            unique_id: next_id,
        });
        next_id += 1;
    }
    deck
}

/// Fisher-Yates shuffle: for each index from last to first, swap with a
/// uniformly chosen index in [0, i]. No-op for decks of length <= 1.
pub fn shuffle<R: Rng>(deck: &mut [Tile], rng: &mut R) {
    for i in (1..deck.len()).rev() {
        let j = rng.gen_range(0..=i);
        deck.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use std::collections::HashSet;

    #[test]
    fn test_deck_has_106_tiles() {
        assert_eq!(build_deck().len(), DECK_SIZE);
    }

    #[test]
    fn test_deck_composition() {
        let deck = build_deck();
        let mut face_counts: HashMap<(u8, TileColor), usize> = HashMap::new();
        let mut false_jokers = 0;
        for tile in &deck {
            match tile.piece_type {
                PieceType::FalseJoker => false_jokers += 1,
                PieceType::Normal => {
                    *face_counts.entry((tile.number, tile.color)).or_insert(0) += 1;
                }
            }
        }
        assert_eq!(false_jokers, 2);
        assert_eq!(face_counts.len(), 52);
        assert!(face_counts.values().all(|&c| c == 2));
    }

    #[test]
    fn test_unique_ids_are_unique() {
        let deck = build_deck();
        let ids: HashSet<u8> = deck.iter().map(|t| t.unique_id).collect();
        assert_eq!(ids.len(), DECK_SIZE);
    }

    #[test]
    fn test_shuffle_preserves_multiset() {
        let mut deck = build_deck();
        let mut rng = StdRng::seed_from_u64(7);
        shuffle(&mut deck, &mut rng);
        let mut sorted: Vec<u8> = deck.iter().map(|t| t.unique_id).collect();
        sorted.sort_unstable();
        let expected: Vec<u8> = (0..DECK_SIZE as u8).collect();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn test_shuffle_is_seed_deterministic() {
        let mut a = build_deck();
        let mut b = build_deck();
        shuffle(&mut a, &mut StdRng::seed_from_u64(42));
        shuffle(&mut b, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_of_tiny_deck_is_noop() {
        let mut empty: Vec<Tile> = vec![];
        shuffle(&mut empty, &mut StdRng::seed_from_u64(1));
        assert!(empty.is_empty());

        let mut one = vec![build_deck()[0]];
        shuffle(&mut one, &mut StdRng::seed_from_u64(1));
        assert_eq!(one[0].unique_id, 0);
    }

    #[test]
    fn test_derive_joker_next_number_same_color() {
        let indicator = Tile {
            number: 7,
            color: TileColor::Red,
            piece_type: PieceType::Normal,
            unique_id: 0,
        };
        assert_eq!(
            derive_joker(&indicator),
            JokerSpec::Face {
                number: 8,
                color: TileColor::Red
            }
        );
    }

    #[test]
    fn test_derive_joker_wraps_13_to_1() {
        let indicator = Tile {
            number: 13,
            color: TileColor::Black,
            piece_type: PieceType::Normal,
            unique_id: 0,
        };
        assert_eq!(
            derive_joker(&indicator),
            JokerSpec::Face {
                number: 1,
                color: TileColor::Black
            }
        );
    }

    #[test]
    fn test_wildcard_indicator_is_its_own_joker() {
        let indicator = Tile {
            number: 0,
            color: TileColor::Black,
            piece_type: PieceType::FalseJoker,
            unique_id: 104,
        };
        assert_eq!(derive_joker(&indicator), JokerSpec::WildcardOnly);

        // Under a wildcard-only spec, no normal tile is a joker.
        let normal = Tile {
            number: 1,
            color: TileColor::Black,
            piece_type: PieceType::Normal,
            unique_id: 0,
        };
        assert!(!normal.is_joker(JokerSpec::WildcardOnly));
        assert!(indicator.is_joker(JokerSpec::WildcardOnly));
    }

    #[test]
    fn test_false_joker_is_always_joker() {
        let fj = Tile {
            number: 0,
            color: TileColor::Black,
            piece_type: PieceType::FalseJoker,
            unique_id: 105,
        };
        assert!(fj.is_joker(JokerSpec::Face {
            number: 5,
            color: TileColor::Yellow
        }));
    }

    #[test]
    fn test_joker_face_match_requires_normal_piece() {
        let spec = JokerSpec::Face {
            number: 8,
            color: TileColor::Red,
        };
        let matching = Tile {
            number: 8,
            color: TileColor::Red,
            piece_type: PieceType::Normal,
            unique_id: 1,
        };
        let wrong_color = Tile {
            number: 8,
            color: TileColor::Blue,
            piece_type: PieceType::Normal,
            unique_id: 2,
        };
        assert!(matching.is_joker(spec));
        assert!(!wrong_color.is_joker(spec));
    }
}
