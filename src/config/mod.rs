use serde::Deserialize;
use std::env;

// Настройки подсистемы карты мест. Политика max_seats приходит от площадки,
// grid_limit - предохранитель от дефектов разбора.
#[derive(Debug, Clone, Deserialize)]
pub struct SeatMapConfig {
    /// Максимум мест в одном заказе (пара считается за два).
    pub max_seats: u32,
    /// Верхняя граница размеров канонической сетки по каждой оси.
    pub grid_limit: u32,
}

impl SeatMapConfig {
    pub fn from_env() -> Self {
        SeatMapConfig {
            max_seats: env::var("SEATMAP_MAX_SEATS")
                .unwrap_or_else(|_| "6".to_string())
                .parse()
                .expect("SEATMAP_MAX_SEATS must be a valid number"),
            grid_limit: env::var("SEATMAP_GRID_LIMIT")
                .unwrap_or_else(|_| "200".to_string())
                .parse()
                .expect("SEATMAP_GRID_LIMIT must be a valid number"),
        }
    }
}

impl Default for SeatMapConfig {
    fn default() -> Self {
        SeatMapConfig {
            max_seats: 6,
            grid_limit: 200,
        }
    }
}
