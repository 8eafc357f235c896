//! normalizer.rs
//!
//! Приведение вендорского payload к плоскому списку канонических записей мест.
//!
//! Ключевые моменты:
//! 1.  **Две формы входа**: AreaGrouped (области, внутри которых места лежат
//!     либо плоским списком, либо маппингом "метка ряда -> {row, detail}") и
//!     FlatList (один плоский массив мест). Обе формы сходятся в один и тот же
//!     `SeatRecord`.
//! 2.  **Таблицы алиасов**: у каждого канонического поля упорядоченный список
//!     принимаемых имён, первый найденный выигрывает. Новый алиас вендора -
//!     это правка таблицы, а не кода.
//! 3.  **Детерминированный синтез ключа**: место без собственного id получает
//!     ключ из (area_id, logical_row, logical_col). Никаких счётчиков:
//!     повторная нормализация того же payload даёт те же ключи.
//! 4.  **Жёсткие дубликаты**: столкновение ключей (своих или синтезированных)
//!     означает внутренне противоречивый payload и прерывает нормализацию.

use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

use crate::error::{SeatMapError, SeatMapWarning};
use crate::models::{Area, SeatKind, SeatRecord};
use crate::services::reconcile::reconcile;
use crate::services::schema::{payload_body, SchemaKind};
use crate::services::status::map_status;

/* ---------- таблицы алиасов ---------- */

const SEAT_KEY_ALIASES: &[&str] = &["seat_no", "sn", "seatNo"];
const LOGICAL_ROW_ALIASES: &[&str] = &["row", "rn", "seatRow"];
const LOGICAL_COL_ALIASES: &[&str] = &["col", "cn", "seatCol"];
const PHYSICAL_X_ALIASES: &[&str] = &["x", "colIndex"];
const PHYSICAL_Y_ALIASES: &[&str] = &["y", "rowIndex"];
const STATUS_ALIASES: &[&str] = &["status", "s"];
const KIND_ALIASES: &[&str] = &["type", "seat_type"];
const SEAT_PRICE_ALIASES: &[&str] = &["price"];
const AREA_ID_ALIASES: &[&str] = &["area_no", "sectionId"];
const AREA_NAME_ALIASES: &[&str] = &["area_name", "sectionName"];
const AREA_PRICE_ALIASES: &[&str] = &["area_price", "price"];

/// Результат нормализации одного payload.
#[derive(Debug)]
pub struct NormalizedPayload {
    pub records: Vec<SeatRecord>,
    pub areas: Vec<Area>,
    pub warnings: Vec<SeatMapWarning>,
}

pub fn normalize(raw: &Value, schema: SchemaKind) -> Result<NormalizedPayload, SeatMapError> {
    let body = payload_body(raw);
    let mut ctx = NormalizeCtx::default();

    match schema {
        SchemaKind::AreaGrouped => ctx.walk_area_grouped(body)?,
        SchemaKind::FlatList => ctx.walk_flat_list(body)?,
    }

    tracing::debug!(
        "normalized {} seats across {} areas, {} warnings",
        ctx.records.len(),
        ctx.areas.len(),
        ctx.warnings.len()
    );
    Ok(ctx.finish())
}

/* ---------- обход форм ---------- */

// Контекст области при разборе AreaGrouped; у FlatList его нет и область
// восстанавливается из полей самого места.
struct AreaScope<'a> {
    area_id: &'a str,
    area_name: &'a str,
    area_price: f64,
}

#[derive(Default)]
struct NormalizeCtx {
    records: Vec<SeatRecord>,
    // BTreeMap ради стабильного порядка областей на выходе.
    areas: BTreeMap<String, Area>,
    warnings: Vec<SeatMapWarning>,
    seen_keys: HashSet<String>,
}

impl NormalizeCtx {
    fn walk_area_grouped(&mut self, body: &Value) -> Result<(), SeatMapError> {
        let room_seat = match body.get("room_seat").and_then(Value::as_array) {
            Some(areas) => areas,
            None => {
                return Err(SeatMapError::UnrecognizedSchema {
                    fragment: body.clone(),
                })
            }
        };

        for (idx, area_v) in room_seat.iter().enumerate() {
            let area_id =
                pick_string(area_v, AREA_ID_ALIASES).unwrap_or_else(|| (idx + 1).to_string());
            let area_name = pick_string(area_v, AREA_NAME_ALIASES).unwrap_or_default();
            let area_price = pick_f64(area_v, AREA_PRICE_ALIASES).unwrap_or(0.0);
            let scope = AreaScope {
                area_id: &area_id,
                area_name: &area_name,
                area_price,
            };

            match area_v.get("seats") {
                // Маппинг "метка ряда -> {row, detail: [...]}".
                Some(Value::Object(rows)) => {
                    for row_v in rows.values() {
                        let detail = row_v.get("detail").and_then(Value::as_array);
                        for seat_v in detail.into_iter().flatten() {
                            self.push_seat(seat_v, Some(&scope))?;
                        }
                    }
                }
                // Плоский список внутри области.
                Some(Value::Array(list)) => {
                    for seat_v in list {
                        self.push_seat(seat_v, Some(&scope))?;
                    }
                }
                _ => {
                    tracing::warn!("area {} carries no seats container, skipped", area_id);
                }
            }
        }
        Ok(())
    }

    fn walk_flat_list(&mut self, body: &Value) -> Result<(), SeatMapError> {
        let seats = match body.get("seats").and_then(Value::as_array) {
            Some(seats) => seats,
            None => {
                return Err(SeatMapError::UnrecognizedSchema {
                    fragment: body.clone(),
                })
            }
        };

        for seat_v in seats {
            self.push_seat(seat_v, None)?;
        }
        Ok(())
    }

    /* ---------- одно место ---------- */

    fn push_seat(&mut self, seat_v: &Value, scope: Option<&AreaScope>) -> Result<(), SeatMapError> {
        let logical = (
            pick_i64(seat_v, LOGICAL_ROW_ALIASES),
            pick_i64(seat_v, LOGICAL_COL_ALIASES),
        );
        let (Some(logical_row), Some(logical_col)) = logical else {
            self.malformed(seat_v);
            return Ok(());
        };
        let logical_row = logical_row as i32;
        let logical_col = logical_col as i32;

        let physical_x = pick_i64(seat_v, PHYSICAL_X_ALIASES).map(|v| v as i32);
        let physical_y = pick_i64(seat_v, PHYSICAL_Y_ALIASES).map(|v| v as i32);

        let Some((canonical_row, canonical_col)) =
            reconcile(logical_row, logical_col, physical_x, physical_y)
        else {
            self.malformed(seat_v);
            return Ok(());
        };

        // Область: из контекста AreaGrouped либо из полей самого места.
        let (area_id, area_name, area_price) = match scope {
            Some(s) => (s.area_id.to_string(), s.area_name.to_string(), s.area_price),
            None => (
                pick_string(seat_v, AREA_ID_ALIASES).unwrap_or_else(|| "1".to_string()),
                pick_string(seat_v, AREA_NAME_ALIASES).unwrap_or_default(),
                pick_f64(seat_v, AREA_PRICE_ALIASES).unwrap_or(0.0),
            ),
        };
        let unit_price = pick_f64(seat_v, SEAT_PRICE_ALIASES).unwrap_or(area_price);

        let seat_key = match pick_string(seat_v, SEAT_KEY_ALIASES) {
            Some(key) if !key.is_empty() => key,
            _ => synthesize_key(&area_id, logical_row, logical_col),
        };
        if !self.seen_keys.insert(seat_key.clone()) {
            tracing::error!("duplicate seat key {} in payload", seat_key);
            return Err(SeatMapError::DuplicateSeatKey {
                key: seat_key,
                fragment: seat_v.clone(),
            });
        }

        let (status, status_warning) = map_status(pick(seat_v, STATUS_ALIASES), &seat_key);
        if let Some(w) = status_warning {
            self.warnings.push(w);
        }

        let seat_kind = match pick_i64(seat_v, KIND_ALIASES) {
            None | Some(0) => SeatKind::Normal,
            Some(1) => SeatKind::CompanionLeft,
            Some(2) => SeatKind::CompanionRight,
            Some(code) => {
                tracing::warn!("unknown seat kind code {} for seat {}", code, seat_key);
                self.warnings.push(SeatMapWarning::UnknownKindCode {
                    seat_key: seat_key.clone(),
                    code,
                });
                SeatKind::Normal
            }
        };

        self.observe_area(&area_id, &area_name, area_price, unit_price, scope.is_some());

        self.records.push(SeatRecord {
            seat_key,
            area_id,
            area_name,
            unit_price,
            logical_row,
            logical_col,
            physical_x,
            physical_y,
            canonical_row,
            canonical_col,
            seat_kind,
            status,
            pair: None,
        });
        Ok(())
    }

    // Место без пригодных координат не попадает в сетку, но и не роняет
    // весь payload.
    fn malformed(&mut self, seat_v: &Value) {
        tracing::warn!("seat entry without usable coordinates skipped: {}", seat_v);
        self.warnings.push(SeatMapWarning::MalformedSeat {
            fragment: seat_v.clone(),
        });
    }

    fn observe_area(
        &mut self,
        area_id: &str,
        area_name: &str,
        area_price: f64,
        unit_price: f64,
        price_from_area: bool,
    ) {
        let area = self.areas.entry(area_id.to_string()).or_insert_with(|| Area {
            area_id: area_id.to_string(),
            area_name: area_name.to_string(),
            // У FlatList цены области нет, её задаёт первое место.
            unit_price: if price_from_area { area_price } else { unit_price },
            price_is_uniform: true,
        });
        if (area.unit_price - unit_price).abs() > f64::EPSILON {
            area.price_is_uniform = false;
        }
    }

    fn finish(self) -> NormalizedPayload {
        NormalizedPayload {
            records: self.records,
            areas: self.areas.into_values().collect(),
            warnings: self.warnings,
        }
    }
}

/// Ключ места без собственного id: детерминированная функция от
/// (area_id, logical_row, logical_col), без счётчиков.
fn synthesize_key(area_id: &str, logical_row: i32, logical_col: i32) -> String {
    format!("{}#{:02}#{:02}", area_id, logical_row, logical_col)
}

/* ---------- выбор полей по алиасам ---------- */

// null считается отсутствием поля, иначе alias с null-значением перекрыл бы
// следующий по списку.
fn pick<'a>(obj: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .find_map(|name| obj.get(*name))
        .filter(|v| !v.is_null())
}

fn pick_i64(obj: &Value, aliases: &[&str]) -> Option<i64> {
    match pick(obj, aliases)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn pick_f64(obj: &Value, aliases: &[&str]) -> Option<f64> {
    match pick(obj, aliases)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn pick_string(obj: &Value, aliases: &[&str]) -> Option<String> {
    match pick(obj, aliases)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
