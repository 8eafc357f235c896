//! reconcile.rs
//!
//! Сведение двух систем координат вендора в одну каноническую позицию.
//!
//! Каждое место несёт две пары координат:
//! 1.  **Логическая** (row/col) - локальна для области, сбрасывается на каждой
//!     области; используется для человеческих номеров мест и wire-формата заказа.
//! 2.  **Физическая** (x/y) - сквозная по всему залу; используется для раскладки.
//!
//! Пары не обязаны совпадать, и процент совпадения разный от области к области.
//! Политика: canonical_row := y, canonical_col := x, потому что физические
//! координаты глобально согласованы, а логические - нет. Логические значения
//! остаются на записи нетронутыми для подписей и кодирования заказа.
//!
//! Обоснование вендора для расхождения недокументировано (восстановлено по
//! образцам payload), поэтому вся политика заперта в этом файле: пересмотр
//! не трогает нормализацию, пары и кодирование.

/// Каноническая позиция места: (row, col), 1-индексация.
///
/// Физическая пара в приоритете; схема FlatList физических координат не несёт,
/// тогда берётся логическая пара. None - координаты непригодны (неположительны
/// или отсутствуют), такая запись отбрасывается вызывающим с предупреждением.
pub fn reconcile(
    logical_row: i32,
    logical_col: i32,
    physical_x: Option<i32>,
    physical_y: Option<i32>,
) -> Option<(u32, u32)> {
    let (row, col) = match (physical_y, physical_x) {
        (Some(y), Some(x)) => (y, x),
        _ => (logical_row, logical_col),
    };

    if row <= 0 || col <= 0 {
        return None;
    }
    Some((row as u32, col as u32))
}
