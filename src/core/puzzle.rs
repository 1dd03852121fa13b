use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::utils::{CardError, CardResult};

pub const GRID_SIDE: usize = 3;
pub const TILE_COUNT: usize = GRID_SIDE * GRID_SIDE;

/// One piece of the photo. `id` and `correct_position` are fixed at creation;
/// only `current_position` moves, and only through a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleTile {
    pub id: usize,
    pub correct_position: usize,
    pub current_position: usize,
}

impl PuzzleTile {
    pub fn is_home(&self) -> bool {
        self.correct_position == self.current_position
    }

    /// Row and column of the photo slice this tile shows.
    pub fn image_cell(&self) -> (usize, usize) {
        (self.correct_position / GRID_SIDE, self.correct_position % GRID_SIDE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected(usize),
    Deselected(usize),
    Swapped { first: usize, second: usize, solved: bool },
    Ignored,
}

#[derive(Debug, Clone)]
pub struct PuzzleEngine {
    photo_url: String,
    // Kept sorted by current_position, so index == board position.
    tiles: Vec<PuzzleTile>,
    selected: Option<usize>,
    solved: bool,
    swap_count: u32,
}

impl PuzzleEngine {
    /// Deals a fresh board. An already-solved deal is reshuffled so the
    /// puzzle never starts finished.
    pub fn shuffled<R: Rng + ?Sized>(photo_url: impl Into<String>, rng: &mut R) -> Self {
        let mut positions: Vec<usize> = (0..TILE_COUNT).collect();
        loop {
            positions.shuffle(rng);
            if positions.iter().enumerate().any(|(id, &pos)| id != pos) {
                break;
            }
        }

        Self::build(photo_url.into(), &positions)
    }

    /// Builds a board from an explicit layout where `positions[id]` is the
    /// current position of tile `id`.
    pub fn from_positions(photo_url: impl Into<String>, positions: &[usize]) -> CardResult<Self> {
        if positions.len() != TILE_COUNT {
            return Err(CardError::content(format!(
                "Puzzle needs {} positions, got {}",
                TILE_COUNT,
                positions.len()
            )));
        }

        let mut seen = [false; TILE_COUNT];
        for &pos in positions {
            if pos >= TILE_COUNT || seen[pos] {
                return Err(CardError::content(format!(
                    "Puzzle positions are not a permutation of 0..{}: {:?}",
                    TILE_COUNT, positions
                )));
            }
            seen[pos] = true;
        }

        Ok(Self::build(photo_url.into(), positions))
    }

    fn build(photo_url: String, positions: &[usize]) -> Self {
        let mut tiles: Vec<PuzzleTile> = positions
            .iter()
            .enumerate()
            .map(|(id, &current_position)| PuzzleTile {
                id,
                correct_position: id,
                current_position,
            })
            .collect();
        tiles.sort_by_key(|tile| tile.current_position);

        let solved = tiles.iter().all(PuzzleTile::is_home);

        Self {
            photo_url,
            tiles,
            selected: None,
            solved,
            swap_count: 0,
        }
    }

    /// Re-selecting the pending tile cancels the selection. Unknown ids and
    /// any selection after the puzzle is solved are ignored.
    pub fn select(&mut self, tile_id: usize) -> SelectOutcome {
        if self.solved || tile_id >= TILE_COUNT {
            return SelectOutcome::Ignored;
        }

        match self.selected {
            None => {
                self.selected = Some(tile_id);
                SelectOutcome::Selected(tile_id)
            }
            Some(pending) if pending == tile_id => {
                self.selected = None;
                SelectOutcome::Deselected(tile_id)
            }
            Some(pending) => {
                self.swap(pending, tile_id);
                self.selected = None;
                SelectOutcome::Swapped {
                    first: pending,
                    second: tile_id,
                    solved: self.solved,
                }
            }
        }
    }

    fn swap(&mut self, first: usize, second: usize) {
        let first_pos = self.position_of(first);
        let second_pos = self.position_of(second);

        self.tiles[first_pos].current_position = second_pos;
        self.tiles[second_pos].current_position = first_pos;
        self.tiles.swap(first_pos, second_pos);

        self.swap_count += 1;
        self.solved = self.tiles.iter().all(PuzzleTile::is_home);
    }

    fn position_of(&self, tile_id: usize) -> usize {
        self.tiles
            .iter()
            .position(|tile| tile.id == tile_id)
            .unwrap_or(tile_id)
    }

    pub fn tile(&self, tile_id: usize) -> Option<&PuzzleTile> {
        self.tiles.iter().find(|tile| tile.id == tile_id)
    }

    pub fn tile_at(&self, position: usize) -> Option<&PuzzleTile> {
        self.tiles.get(position)
    }

    /// Tiles in display order (ascending current position).
    pub fn tiles(&self) -> &[PuzzleTile] {
        &self.tiles
    }

    pub fn rows(&self) -> impl Iterator<Item = &[PuzzleTile]> {
        self.tiles.chunks(GRID_SIDE)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn swap_count(&self) -> u32 {
        self.swap_count
    }

    pub fn tiles_home(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_home()).count()
    }

    pub fn photo_url(&self) -> &str {
        &self.photo_url
    }
}
