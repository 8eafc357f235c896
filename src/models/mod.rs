pub mod area;
pub mod matrix;
pub mod seat;

pub use area::Area;
pub use matrix::{CompanionPair, PairId, SeatIdx, SeatMatrix};
pub use seat::{CanonicalStatus, SeatKind, SeatRecord};
