//! A player's hand of tiles.
//!
//! Holds 14 tiles between turns and transiently 15 right after a draw.
//! Duplicate faces are expected; duplicate instances (same `unique_id`)
//! are rejected.

use serde::{Deserialize, Serialize};

use crate::engine::tile::Tile;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hand {
    tiles: Vec<Tile>,
}

impl Hand {
    pub fn new() -> Self {
        Self { tiles: Vec::new() }
    }

    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        let mut hand = Self::new();
        for tile in tiles {
            hand.add(tile);
        }
        hand
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Add a tile. Returns false (and leaves the hand unchanged) if an
    /// instance with the same `unique_id` is already held.
    pub fn add(&mut self, tile: Tile) -> bool {
        if self.contains_id(tile.unique_id) {
            return false;
        }
        self.tiles.push(tile);
        true
    }

    /// Remove and return the tile with the given instance id, if held.
    pub fn remove(&mut self, unique_id: u8) -> Option<Tile> {
        let pos = self.tiles.iter().position(|t| t.unique_id == unique_id)?;
        Some(self.tiles.remove(pos))
    }

    pub fn contains_id(&self, unique_id: u8) -> bool {
        self.tiles.iter().any(|t| t.unique_id == unique_id)
    }

    /// True if any held tile shows the given face (instance id ignored).
    pub fn contains_face(&self, face: &Tile) -> bool {
        self.tiles.iter().any(|t| t.same_face(face))
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }
}
