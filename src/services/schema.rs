use serde_json::{json, Value};

use crate::error::SeatMapError;

// Определение схемы вендорского payload. Единственная точка, где различаются
// форматы: дальше каждый шаг работает с уже известной формой.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// Области с вложенными рядами: `room_seat: [{area_no, seats, ...}]`.
    AreaGrouped,
    /// Плоский список мест: `seats: [{rn, cn, s, ...}]`.
    FlatList,
}

/// Снимает один уровень конверта `data`, в котором некоторые эндпоинты
/// оборачивают тело ответа.
pub(crate) fn payload_body(raw: &Value) -> &Value {
    match raw.get("data") {
        Some(body) if body.is_object() => body,
        _ => raw,
    }
}

pub fn detect(raw: &Value) -> Result<SchemaKind, SeatMapError> {
    let body = payload_body(raw);

    if body.get("room_seat").map(Value::is_array) == Some(true) {
        return Ok(SchemaKind::AreaGrouped);
    }
    if body.get("seats").map(Value::is_array) == Some(true) {
        return Ok(SchemaKind::FlatList);
    }

    // Неизвестная форма - вендор поменял формат; ошибка не ретраится.
    tracing::error!("seat payload schema not recognized");
    Err(SeatMapError::UnrecognizedSchema {
        fragment: shape_fragment(raw),
    })
}

// Для диагностики достаточно верхнеуровневой формы, сам payload может быть
// большим и содержать персональные данные сессии.
fn shape_fragment(raw: &Value) -> Value {
    match raw {
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            json!({ "object_keys": keys })
        }
        Value::Array(items) => json!({ "array_len": items.len() }),
        other => other.clone(),
    }
}
