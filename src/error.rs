use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// Ошибки подсистемы карты мест.
//
// Ошибки данных (схема, дубликаты, размеры сетки) несут в себе проблемный
// фрагмент payload для диагностики. SeatUnavailable / SelectionLimitExceeded -
// штатные отказы toggle, состояние выбора при них не меняется.
// InvariantViolation - нарушение контракта внутри подсистемы, не ошибка данных.
#[derive(Debug, Error)]
pub enum SeatMapError {
    /// Форма payload не опознана ни одной из известных схем вендора.
    #[error("unrecognized seat payload schema")]
    UnrecognizedSchema { fragment: Value },

    /// Два места дали один и тот же seat_key, payload внутренне противоречив.
    #[error("duplicate seat key {key}")]
    DuplicateSeatKey { key: String, fragment: Value },

    /// Размеры сетки неправдоподобны - дефект разбора, а не гигантский зал.
    #[error("grid {rows}x{cols} exceeds sanity limit {limit}")]
    GridOverflow { rows: u32, cols: u32, limit: u32 },

    /// Два места свелись в одну каноническую ячейку.
    #[error("seats {first} and {second} both resolve to cell ({row}, {col})")]
    PositionClash {
        first: String,
        second: String,
        row: u32,
        col: u32,
    },

    /// Место нельзя выбрать: продано, заблокировано или не существует.
    #[error("seat {key} is not available")]
    SeatUnavailable { key: String },

    /// Выбор превысил бы лимит мест (пара считается за два).
    #[error("selection limit of {max_seats} seats exceeded")]
    SelectionLimitExceeded { max_seats: u32 },

    /// Нарушен внутренний контракт (например, полпары в выборе при кодировании).
    #[error("selection invariant violated: {reason}")]
    InvariantViolation { reason: String },
}

// Нефатальные наблюдения при нормализации. Уходят коллаборатору логирования,
// в диалоги пользователя не попадают.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SeatMapWarning {
    /// Код статуса не из известного набора, место показано как свободное.
    UnknownStatusCode { seat_key: String, code: String },
    /// Код типа места не из известного набора, место считается обычным.
    UnknownKindCode { seat_key: String, code: i64 },
    /// Парное место без партнёра, понижено до обычного.
    UnpairedCompanion { seat_key: String },
    /// Запись места без пригодных координат, пропущена.
    MalformedSeat { fragment: Value },
}
