//! Set and sequence validation, with wildcard substitution.
//!
//! A set is 3-4 tiles of one number in pairwise-distinct colors. A sequence
//! is 3+ tiles of one color with consecutive numbers, wrapping 13 -> 1 at
//! the top end (12-13-1 is valid, 13-1-2 is not). Jokers substitute for any
//! missing tile in either shape.
//!
//! `find_all_valid_*` enumerate every candidate grouping in a hand; the hand
//! is at most 15 tiles, so brute-force combination enumeration within each
//! number/color bucket stays cheap.

use std::collections::{BTreeMap, HashSet};

use crate::engine::tile::{JokerSpec, Tile, TileColor, MAX_NUMBER, MIN_NUMBER};

/// Valid iff 3-4 tiles, all non-jokers share one number and no two share a
/// color. An all-joker group of valid size is accepted.
pub fn validate_set(tiles: &[Tile], joker: JokerSpec) -> bool {
    if !(3..=4).contains(&tiles.len()) {
        return false;
    }
    let naturals: Vec<&Tile> = tiles.iter().filter(|t| !t.is_joker(joker)).collect();
    let Some(first) = naturals.first() else {
        // Degenerate all-joker set.
        return true;
    };
    if naturals.iter().any(|t| t.number != first.number) {
        return false;
    }
    let mut colors = HashSet::new();
    naturals.iter().all(|t| colors.insert(t.color))
}

/// Valid iff 3+ tiles of one color whose numbers (plus jokers filling gaps
/// or extending the ends) form a consecutive run. The run may end on a
/// wrapped 1 (counted as 14) but never continues past it.
pub fn validate_sequence(tiles: &[Tile], joker: JokerSpec) -> bool {
    let len = tiles.len();
    if len < 3 || len > MAX_NUMBER as usize {
        return false;
    }
    let naturals: Vec<&Tile> = tiles.iter().filter(|t| !t.is_joker(joker)).collect();
    let Some(first) = naturals.first() else {
        // Degenerate all-joker sequence.
        return true;
    };
    if naturals.iter().any(|t| t.color != first.color) {
        return false;
    }
    let mut numbers: Vec<u8> = naturals.iter().map(|t| t.number).collect();
    numbers.sort_unstable();
    if numbers.windows(2).any(|w| w[0] == w[1]) {
        return false;
    }
    if fits_window(&numbers, len, MIN_NUMBER, MAX_NUMBER) {
        return true;
    }
    // Wrap: re-read the 1 as 14 so runs like 12-13-1 fit.
    if numbers[0] == MIN_NUMBER {
        let mut wrapped: Vec<u8> = numbers[1..].to_vec();
        wrapped.push(MAX_NUMBER + 1);
        return fits_window(&wrapped, len, MIN_NUMBER + 1, MAX_NUMBER + 1);
    }
    false
}

/// True if some window of `len` consecutive numbers within [lo, hi] contains
/// every value in `sorted`. Jokers occupy the unclaimed positions.
fn fits_window(sorted: &[u8], len: usize, lo: u8, hi: u8) -> bool {
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    let span = (max - min + 1) as usize;
    if span > len {
        return false;
    }
    let width = len as u8 - 1;
    let start_min = lo.max(max.saturating_sub(width));
    let start_max = min.min(hi - width);
    start_min <= start_max
}

/// Enumerate every valid set in `tiles`: bucket naturals by number, then test
/// each 3/4-combination of the bucket plus the available jokers.
pub fn find_all_valid_sets(tiles: &[Tile], joker: JokerSpec) -> Vec<Vec<Tile>> {
    let (jokers, naturals) = partition_jokers(tiles, joker);
    let mut by_number: BTreeMap<u8, Vec<Tile>> = BTreeMap::new();
    for tile in naturals {
        by_number.entry(tile.number).or_default().push(tile);
    }

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for group in by_number.values() {
        let mut pool = group.clone();
        pool.extend_from_slice(&jokers);
        collect_valid(&pool, 3, 4, joker, validate_set, &mut seen, &mut out);
    }
    // All-joker groups never intersect a number bucket with naturals in it.
    collect_valid(&jokers, 3, 4, joker, validate_set, &mut seen, &mut out);
    out
}

/// Enumerate every valid sequence in `tiles`: bucket naturals by color, then
/// test each combination of size >= 3 of the bucket plus the jokers.
pub fn find_all_valid_sequences(tiles: &[Tile], joker: JokerSpec) -> Vec<Vec<Tile>> {
    let (jokers, naturals) = partition_jokers(tiles, joker);
    let mut by_color: BTreeMap<TileColor, Vec<Tile>> = BTreeMap::new();
    for tile in naturals {
        by_color.entry(tile.color).or_default().push(tile);
    }

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for group in by_color.values() {
        let mut pool = group.clone();
        pool.extend_from_slice(&jokers);
        let max_len = pool.len().min(MAX_NUMBER as usize);
        collect_valid(&pool, 3, max_len, joker, validate_sequence, &mut seen, &mut out);
    }
    collect_valid(&jokers, 3, jokers.len(), joker, validate_sequence, &mut seen, &mut out);
    out
}

fn partition_jokers(tiles: &[Tile], joker: JokerSpec) -> (Vec<Tile>, Vec<Tile>) {
    tiles.iter().partition(|t| t.is_joker(joker))
}

fn collect_valid(
    pool: &[Tile],
    min_len: usize,
    max_len: usize,
    joker: JokerSpec,
    validate: fn(&[Tile], JokerSpec) -> bool,
    seen: &mut HashSet<Vec<u8>>,
    out: &mut Vec<Vec<Tile>>,
) {
    for k in min_len..=max_len.min(pool.len()) {
        let mut combo = Vec::with_capacity(k);
        combinations(pool, k, 0, &mut combo, &mut |group| {
            if validate(group, joker) {
                let mut key: Vec<u8> = group.iter().map(|t| t.unique_id).collect();
                key.sort_unstable();
                if seen.insert(key) {
                    out.push(group.to_vec());
                }
            }
        });
    }
}

fn combinations(
    pool: &[Tile],
    k: usize,
    start: usize,
    current: &mut Vec<Tile>,
    visit: &mut impl FnMut(&[Tile]),
) {
    if current.len() == k {
        visit(current);
        return;
    }
    let needed = k - current.len();
    for i in start..pool.len() {
        if pool.len() - i < needed {
            break;
        }
        current.push(pool[i]);
        combinations(pool, k, i + 1, current, visit);
        current.pop();
    }
}
