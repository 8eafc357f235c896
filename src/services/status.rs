use serde_json::Value;

use crate::error::SeatMapWarning;
use crate::models::CanonicalStatus;

// Маппинг вендорских кодов статуса в канонический.
//
// Числовая схема: 0 - свободно, 1 - продано, 2 - заблокировано.
// Буквенная (FlatList): F - свободно, B - продано.
// Любой другой код - fail-open: место показывается свободным, но помечается
// предупреждением. Нераспознанный код не должен выглядеть как ложно проданное
// место; попытка его купить упрётся в отказ вендора, что безопаснее.
pub fn map_status(
    code: Option<&Value>,
    seat_key: &str,
) -> (CanonicalStatus, Option<SeatMapWarning>) {
    match code {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(0) => (CanonicalStatus::Available, None),
            Some(1) => (CanonicalStatus::Sold, None),
            Some(2) => (CanonicalStatus::Locked, None),
            _ => unknown(seat_key, &n.to_string()),
        },
        Some(Value::String(s)) => match s.trim() {
            "F" => (CanonicalStatus::Available, None),
            "B" => (CanonicalStatus::Sold, None),
            // Числовые коды встречаются и строками.
            t => match t.parse::<i64>() {
                Ok(0) => (CanonicalStatus::Available, None),
                Ok(1) => (CanonicalStatus::Sold, None),
                Ok(2) => (CanonicalStatus::Locked, None),
                _ => unknown(seat_key, s),
            },
        },
        Some(other) => unknown(seat_key, &other.to_string()),
        None => unknown(seat_key, "<missing>"),
    }
}

fn unknown(seat_key: &str, code: &str) -> (CanonicalStatus, Option<SeatMapWarning>) {
    tracing::warn!("unknown seat status code {} for seat {}", code, seat_key);
    (
        CanonicalStatus::Available,
        Some(SeatMapWarning::UnknownStatusCode {
            seat_key: seat_key.to_string(),
            code: code.to_string(),
        }),
    )
}
