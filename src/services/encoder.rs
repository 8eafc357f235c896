use serde::Serialize;

use crate::error::SeatMapError;
use crate::models::SeatMatrix;
use crate::services::selection::SelectionState;

// Кодирование выбора в wire-строку вендора:
// `{area_id}:{logical_row}:{logical_col}:{seat_key}`, сегменты через `|`,
// в порядке выбора (вставки), не в порядке сетки - эндпоинт создания заказа
// чувствителен к порядку сегментов пары (левый раньше правого).
// В сегменты идут ЛОГИЧЕСКИЕ координаты; канонические существуют только для
// раскладки сетки и сюда не попадают.

/// Контекст сеанса, рядом с которым строка уходит в заказ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleContext {
    pub cinema_id: String,
    pub schedule_id: String,
}

/// Готовая форма для коллаборатора создания заказа.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSubmission {
    pub cinema_id: String,
    pub schedule_id: String,
    pub seat_label: String,
}

pub fn encode(
    state: &SelectionState,
    matrix: &SeatMatrix,
    context: &ScheduleContext,
) -> Result<OrderSubmission, SeatMapError> {
    let mut segments: Vec<String> = Vec::with_capacity(state.len());

    for key in state.selected() {
        let seat = matrix
            .seat(key)
            .ok_or_else(|| SeatMapError::InvariantViolation {
                reason: format!("selection references seat {} missing from matrix", key),
            })?;

        // Полпары в выборе - дефект движка выбора, не данных; падаем громко,
        // чтобы не отправить вендору кривой заказ.
        if let Some(pair) = matrix.pair_of(key) {
            let partner = pair.partner_of(key).unwrap_or_default();
            if !state.contains(partner) {
                return Err(SeatMapError::InvariantViolation {
                    reason: format!(
                        "companion seat {} selected without partner {}",
                        key, partner
                    ),
                });
            }
        }

        segments.push(format!(
            "{}:{}:{}:{}",
            seat.area_id, seat.logical_row, seat.logical_col, seat.seat_key
        ));
    }

    Ok(OrderSubmission {
        cinema_id: context.cinema_id.clone(),
        schedule_id: context.schedule_id.clone(),
        seat_label: segments.join("|"),
    })
}
