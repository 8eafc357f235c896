use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::area::Area;
use crate::models::seat::SeatRecord;

/// Индекс места внутри матрицы.
pub type SeatIdx = usize;
/// Идентификатор пары в реестре матрицы.
pub type PairId = usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanionPair {
    pub left_key: String,
    pub right_key: String,
    pub canonical_row: u32,
}

impl CompanionPair {
    /// Ключ второго места пары.
    pub fn partner_of(&self, key: &str) -> Option<&str> {
        if self.left_key == key {
            Some(&self.right_key)
        } else if self.right_key == key {
            Some(&self.left_key)
        } else {
            None
        }
    }
}

// Каноническая сетка зала. Владеет местами, таблицей областей и реестром пар;
// места ссылаются на область по area_id и на пару по PairId, без циклов.
// Пересобирается целиком на каждый fetch payload, после сборки не меняется.
#[derive(Debug, Clone)]
pub struct SeatMatrix {
    rows: u32,
    cols: u32,
    grid: Vec<Vec<Option<SeatIdx>>>,
    seats: Vec<SeatRecord>,
    by_key: HashMap<String, SeatIdx>,
    areas: HashMap<String, Area>,
    pairs: Vec<CompanionPair>,
}

impl SeatMatrix {
    pub(crate) fn assemble(
        rows: u32,
        cols: u32,
        grid: Vec<Vec<Option<SeatIdx>>>,
        seats: Vec<SeatRecord>,
        by_key: HashMap<String, SeatIdx>,
        areas: HashMap<String, Area>,
        pairs: Vec<CompanionPair>,
    ) -> Self {
        Self {
            rows,
            cols,
            grid,
            seats,
            by_key,
            areas,
            pairs,
        }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    pub fn seats(&self) -> &[SeatRecord] {
        &self.seats
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn seat(&self, key: &str) -> Option<&SeatRecord> {
        self.by_key.get(key).map(|&idx| &self.seats[idx])
    }

    /// Место в канонической ячейке (1-индексация); None - проход или пустота.
    pub fn at(&self, canonical_row: u32, canonical_col: u32) -> Option<&SeatRecord> {
        if canonical_row == 0 || canonical_col == 0 {
            return None;
        }
        self.grid
            .get(canonical_row as usize - 1)?
            .get(canonical_col as usize - 1)?
            .map(|idx| &self.seats[idx])
    }

    pub fn area(&self, area_id: &str) -> Option<&Area> {
        self.areas.get(area_id)
    }

    pub fn areas(&self) -> impl Iterator<Item = &Area> {
        self.areas.values()
    }

    pub fn pairs(&self) -> &[CompanionPair] {
        &self.pairs
    }

    pub fn pair(&self, id: PairId) -> Option<&CompanionPair> {
        self.pairs.get(id)
    }

    /// Пара, в которую входит место, если оно парное.
    pub fn pair_of(&self, key: &str) -> Option<&CompanionPair> {
        self.seat(key)?.pair.and_then(|id| self.pairs.get(id))
    }
}
