use serde::{Deserialize, Serialize};

use crate::models::matrix::PairId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanonicalStatus {
    Available,
    Sold,
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatKind {
    Normal,
    CompanionLeft,
    CompanionRight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatRecord {
    pub seat_key: String,
    pub area_id: String,
    pub area_name: String,
    pub unit_price: f64,
    pub logical_row: i32,
    pub logical_col: i32,
    pub physical_x: Option<i32>,
    pub physical_y: Option<i32>,
    pub canonical_row: u32,
    pub canonical_col: u32,
    pub seat_kind: SeatKind,
    pub status: CanonicalStatus,
    pub pair: Option<PairId>,
}
