//! pairing.rs
//!
//! Разрешение "парных" (love seat) мест. Код типа 1 - левое место пары,
//! 2 - правое. Пара собирается по соседству в канонической сетке: для левого
//! в (row, c) правое ищется в той же строке в c+1, затем в c-1 - порядок
//! записей в payload не монотонен, полагаться на него нельзя.
//!
//! Реестр пар принадлежит матрице; на записях мест остаётся только PairId,
//! прямых перекрёстных ссылок между местами нет. Парное место без партнёра
//! понижается до обычного с предупреждением: место никогда не выбрасывается,
//! партнёр никогда не выдумывается.

use std::collections::HashMap;

use crate::error::SeatMapWarning;
use crate::models::{CompanionPair, SeatKind, SeatRecord};

pub fn resolve(records: &mut [SeatRecord]) -> (Vec<CompanionPair>, Vec<SeatMapWarning>) {
    let mut pairs: Vec<CompanionPair> = Vec::new();
    let mut warnings: Vec<SeatMapWarning> = Vec::new();

    // Позиция -> индекс записи, для поиска соседей.
    let by_pos: HashMap<(u32, u32), usize> = records
        .iter()
        .enumerate()
        .map(|(idx, r)| ((r.canonical_row, r.canonical_col), idx))
        .collect();

    // Левые обрабатываются в порядке (row, col), чтобы разбор на пары не
    // зависел от порядка записей в payload.
    let mut lefts: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.seat_kind == SeatKind::CompanionLeft)
        .map(|(idx, _)| idx)
        .collect();
    lefts.sort_by_key(|&idx| (records[idx].canonical_row, records[idx].canonical_col));

    let mut claimed = vec![false; records.len()];

    for left_idx in lefts {
        let (row, col) = (
            records[left_idx].canonical_row,
            records[left_idx].canonical_col,
        );

        let partner = [col + 1, col.wrapping_sub(1)]
            .into_iter()
            .filter(|&c| c > 0)
            .filter_map(|c| by_pos.get(&(row, c)).copied())
            .find(|&idx| records[idx].seat_kind == SeatKind::CompanionRight && !claimed[idx]);

        if let Some(right_idx) = partner {
            let pair_id = pairs.len();
            claimed[left_idx] = true;
            claimed[right_idx] = true;
            records[left_idx].pair = Some(pair_id);
            records[right_idx].pair = Some(pair_id);
            pairs.push(CompanionPair {
                left_key: records[left_idx].seat_key.clone(),
                right_key: records[right_idx].seat_key.clone(),
                canonical_row: row,
            });
        }
    }

    // Непристроенные парные места (левые без правых и наоборот) понижаются.
    for record in records.iter_mut() {
        if record.pair.is_none()
            && matches!(
                record.seat_kind,
                SeatKind::CompanionLeft | SeatKind::CompanionRight
            )
        {
            tracing::warn!(
                "companion seat {} has no adjacent partner, demoted to normal",
                record.seat_key
            );
            warnings.push(SeatMapWarning::UnpairedCompanion {
                seat_key: record.seat_key.clone(),
            });
            record.seat_kind = SeatKind::Normal;
        }
    }

    (pairs, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CanonicalStatus;

    fn seat(key: &str, row: u32, col: u32, kind: SeatKind) -> SeatRecord {
        SeatRecord {
            seat_key: key.to_string(),
            area_id: "1".to_string(),
            area_name: String::new(),
            unit_price: 0.0,
            logical_row: row as i32,
            logical_col: col as i32,
            physical_x: Some(col as i32),
            physical_y: Some(row as i32),
            canonical_row: row,
            canonical_col: col,
            seat_kind: kind,
            status: CanonicalStatus::Available,
            pair: None,
        }
    }

    #[test]
    fn adjacent_left_right_pair_up() {
        let mut records = vec![
            seat("l", 9, 3, SeatKind::CompanionLeft),
            seat("r", 9, 4, SeatKind::CompanionRight),
        ];
        let (pairs, warnings) = resolve(&mut records);
        assert_eq!(pairs.len(), 1);
        assert!(warnings.is_empty());
        assert_eq!(pairs[0].left_key, "l");
        assert_eq!(pairs[0].right_key, "r");
        assert_eq!(records[0].pair, Some(0));
        assert_eq!(records[1].pair, Some(0));
    }

    #[test]
    fn right_may_sit_left_of_left() {
        // Вендор иногда кладёт "правое" место слева от "левого".
        let mut records = vec![
            seat("r", 5, 1, SeatKind::CompanionRight),
            seat("l", 5, 2, SeatKind::CompanionLeft),
        ];
        let (pairs, warnings) = resolve(&mut records);
        assert_eq!(pairs.len(), 1);
        assert!(warnings.is_empty());
        assert_eq!(pairs[0].left_key, "l");
        assert_eq!(pairs[0].right_key, "r");
    }

    #[test]
    fn unpaired_companion_is_demoted_with_warning() {
        let mut records = vec![
            seat("lonely", 2, 2, SeatKind::CompanionLeft),
            seat("plain", 2, 3, SeatKind::Normal),
        ];
        let (pairs, warnings) = resolve(&mut records);
        assert!(pairs.is_empty());
        assert_eq!(records[0].seat_kind, SeatKind::Normal);
        assert_eq!(
            warnings,
            vec![SeatMapWarning::UnpairedCompanion {
                seat_key: "lonely".to_string()
            }]
        );
    }

    #[test]
    fn orphan_right_is_demoted_too() {
        let mut records = vec![seat("r", 1, 4, SeatKind::CompanionRight)];
        let (pairs, warnings) = resolve(&mut records);
        assert!(pairs.is_empty());
        assert_eq!(records[0].seat_kind, SeatKind::Normal);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn different_row_never_pairs() {
        let mut records = vec![
            seat("l", 1, 1, SeatKind::CompanionLeft),
            seat("r", 2, 2, SeatKind::CompanionRight),
        ];
        let (pairs, warnings) = resolve(&mut records);
        assert!(pairs.is_empty());
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn one_right_is_not_claimed_twice() {
        // Два левых вокруг одного правого: правый достаётся левому с меньшей
        // колонкой, второй левый понижается.
        let mut records = vec![
            seat("l2", 3, 4, SeatKind::CompanionLeft),
            seat("r", 3, 3, SeatKind::CompanionRight),
            seat("l1", 3, 2, SeatKind::CompanionLeft),
        ];
        let (pairs, warnings) = resolve(&mut records);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].left_key, "l1");
        assert_eq!(warnings.len(), 1);
        assert_eq!(records[0].seat_kind, SeatKind::Normal);
    }

    #[test]
    fn pairing_ignores_payload_order() {
        let mut forward = vec![
            seat("l", 9, 3, SeatKind::CompanionLeft),
            seat("r", 9, 4, SeatKind::CompanionRight),
        ];
        let mut reversed = vec![
            seat("r", 9, 4, SeatKind::CompanionRight),
            seat("l", 9, 3, SeatKind::CompanionLeft),
        ];
        let (pairs_a, _) = resolve(&mut forward);
        let (pairs_b, _) = resolve(&mut reversed);
        assert_eq!(pairs_a, pairs_b);
    }
}
