use std::collections::HashMap;

use crate::config::SeatMapConfig;
use crate::error::SeatMapError;
use crate::models::{Area, CompanionPair, SeatIdx, SeatMatrix, SeatRecord};

// Сборка канонической сетки. Размеры - максимумы канонических координат
// (1-индексация), пустые ячейки - проходы. Размеры сверх grid_limit считаются
// дефектом разбора, а не огромным залом.
pub fn build(
    records: Vec<SeatRecord>,
    pairs: Vec<CompanionPair>,
    areas: Vec<Area>,
    config: &SeatMapConfig,
) -> Result<SeatMatrix, SeatMapError> {
    let rows = records.iter().map(|r| r.canonical_row).max().unwrap_or(0);
    let cols = records.iter().map(|r| r.canonical_col).max().unwrap_or(0);

    if rows > config.grid_limit || cols > config.grid_limit {
        tracing::error!(
            "implausible grid {}x{} (limit {}), refusing to build",
            rows,
            cols,
            config.grid_limit
        );
        return Err(SeatMapError::GridOverflow {
            rows,
            cols,
            limit: config.grid_limit,
        });
    }

    let mut grid: Vec<Vec<Option<SeatIdx>>> = vec![vec![None; cols as usize]; rows as usize];
    let mut by_key: HashMap<String, SeatIdx> = HashMap::with_capacity(records.len());

    for (idx, record) in records.iter().enumerate() {
        let cell = &mut grid[record.canonical_row as usize - 1][record.canonical_col as usize - 1];
        if let Some(existing) = *cell {
            return Err(SeatMapError::PositionClash {
                first: records[existing].seat_key.clone(),
                second: record.seat_key.clone(),
                row: record.canonical_row,
                col: record.canonical_col,
            });
        }
        *cell = Some(idx);
        // Дубликаты ключей отрезаны нормализатором.
        by_key.insert(record.seat_key.clone(), idx);
    }

    let areas = areas
        .into_iter()
        .map(|a| (a.area_id.clone(), a))
        .collect::<HashMap<_, _>>();

    tracing::debug!("built {}x{} seat matrix, {} seats", rows, cols, records.len());
    Ok(SeatMatrix::assemble(
        rows, cols, grid, records, by_key, areas, pairs,
    ))
}
