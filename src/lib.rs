pub mod config;
pub mod error;
pub mod models;
pub mod services;

use serde_json::Value;
use tracing::info;

pub use config::SeatMapConfig;
pub use error::{SeatMapError, SeatMapWarning};
pub use models::{
    Area, CanonicalStatus, CompanionPair, SeatKind, SeatMatrix, SeatRecord,
};
pub use services::encoder::{OrderSubmission, ScheduleContext};
pub use services::schema::SchemaKind;
pub use services::selection::{SelectionState, ToggleOutcome};

// Состояние одной сессии просмотра карты мест: матрица, выбор и накопленные
// предупреждения нормализации. Сессии независимы; новая строится из нового
// payload, неудачная сборка не трогает прежнюю сессию у вызывающего.
#[derive(Debug, Clone)]
pub struct SeatMapSession {
    pub matrix: SeatMatrix,
    pub selection: SelectionState,
    pub warnings: Vec<SeatMapWarning>,
}

impl SeatMapSession {
    /// Полный конвейер: detect -> normalize -> pairing -> build.
    pub fn from_payload(raw: &Value, config: &SeatMapConfig) -> Result<Self, SeatMapError> {
        let schema = services::schema::detect(raw)?;
        let mut normalized = services::normalizer::normalize(raw, schema)?;
        let (pairs, mut pairing_warnings) = services::pairing::resolve(&mut normalized.records);
        let matrix =
            services::builder::build(normalized.records, pairs, normalized.areas, config)?;

        let mut warnings = normalized.warnings;
        warnings.append(&mut pairing_warnings);

        info!(
            "seat map session ready: {}x{}, {} seats, {} pairs, {} warnings",
            matrix.rows(),
            matrix.cols(),
            matrix.seat_count(),
            matrix.pairs().len(),
            warnings.len()
        );
        Ok(Self {
            matrix,
            selection: SelectionState::new(config.max_seats),
            warnings,
        })
    }

    pub fn toggle(&mut self, key: &str) -> Result<ToggleOutcome, SeatMapError> {
        self.selection.toggle(&self.matrix, key)
    }

    /// Записи выбранных мест в порядке выбора.
    pub fn selected_seats(&self) -> Vec<&SeatRecord> {
        self.selection
            .selected()
            .iter()
            .filter_map(|key| self.matrix.seat(key))
            .collect()
    }

    pub fn encode(&self, context: &ScheduleContext) -> Result<OrderSubmission, SeatMapError> {
        services::encoder::encode(&self.selection, &self.matrix, context)
    }
}
