//! selection.rs
//!
//! Состояние выбора мест и единственный переход над ним - toggle.
//!
//! Состояние живёт одну сессию просмотра карты: пересборка матрицы или конец
//! сессии его выбрасывают. Владелец (event loop GUI или сервисный слой)
//! сериализует вызовы toggle сам; здесь нет ни блокировок, ни I/O.
//!
//! Правила:
//! - парные места выбираются и снимаются только вдвоём, левый ключ кладётся
//!   в выбор раньше правого (wire-формат чувствителен к порядку);
//! - доступность перепроверяется по живой матрице, не по кешу;
//! - превышение лимита отклоняет действие целиком, полпары в выборе не бывает.

use serde::Serialize;

use crate::error::SeatMapError;
use crate::models::{CanonicalStatus, SeatMatrix, SeatRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ToggleOutcome {
    Selected { keys: Vec<String> },
    Deselected { keys: Vec<String> },
}

// Выбор хранится вектором ради порядка вставки: кодирование заказа обязано
// идти в порядке выбора, не в порядке сетки.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionState {
    selected: Vec<String>,
    max_seats: u32,
}

impl SelectionState {
    pub fn new(max_seats: u32) -> Self {
        Self {
            selected: Vec::new(),
            max_seats,
        }
    }

    // Сборка произвольного состояния в обход toggle, для негативных тестов
    // кодировщика.
    #[cfg(test)]
    pub(crate) fn with_selected(keys: Vec<String>, max_seats: u32) -> Self {
        Self {
            selected: keys,
            max_seats,
        }
    }

    pub fn max_seats(&self) -> u32 {
        self.max_seats
    }

    /// Выбранные ключи в порядке вставки.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.selected.iter().any(|k| k == key)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Переключить место. Повторный toggle того же ключа - штатное
    /// выбор/снятие, частичных состояний не бывает.
    pub fn toggle(
        &mut self,
        matrix: &SeatMatrix,
        key: &str,
    ) -> Result<ToggleOutcome, SeatMapError> {
        if self.contains(key) {
            return Ok(self.deselect(matrix, key));
        }

        // Ключ вне живой матрицы выбрать нельзя.
        let seat = matrix.seat(key).ok_or_else(|| SeatMapError::SeatUnavailable {
            key: key.to_string(),
        })?;

        match seat.pair {
            Some(pair_id) => self.select_pair(matrix, pair_id),
            None => self.select_single(seat),
        }
    }

    fn select_single(&mut self, seat: &SeatRecord) -> Result<ToggleOutcome, SeatMapError> {
        if seat.status != CanonicalStatus::Available {
            return Err(SeatMapError::SeatUnavailable {
                key: seat.seat_key.clone(),
            });
        }
        if self.selected.len() as u32 + 1 > self.max_seats {
            return Err(SeatMapError::SelectionLimitExceeded {
                max_seats: self.max_seats,
            });
        }
        self.selected.push(seat.seat_key.clone());
        Ok(ToggleOutcome::Selected {
            keys: vec![seat.seat_key.clone()],
        })
    }

    fn select_pair(
        &mut self,
        matrix: &SeatMatrix,
        pair_id: usize,
    ) -> Result<ToggleOutcome, SeatMapError> {
        let pair = matrix
            .pair(pair_id)
            .ok_or_else(|| SeatMapError::InvariantViolation {
                reason: format!("seat references missing pair id {}", pair_id),
            })?;

        // Оба места проверяются по живой матрице до любой мутации.
        for key in [&pair.left_key, &pair.right_key] {
            let member = matrix.seat(key).ok_or_else(|| SeatMapError::InvariantViolation {
                reason: format!("pair member {} missing from matrix", key),
            })?;
            if member.status != CanonicalStatus::Available {
                return Err(SeatMapError::SeatUnavailable {
                    key: member.seat_key.clone(),
                });
            }
        }
        // Пара считается за два; отклоняется целиком, состояние не меняется.
        if self.selected.len() as u32 + 2 > self.max_seats {
            return Err(SeatMapError::SelectionLimitExceeded {
                max_seats: self.max_seats,
            });
        }

        // Левый раньше правого независимо от того, по какому кликнули.
        self.selected.push(pair.left_key.clone());
        self.selected.push(pair.right_key.clone());
        Ok(ToggleOutcome::Selected {
            keys: vec![pair.left_key.clone(), pair.right_key.clone()],
        })
    }

    fn deselect(&mut self, matrix: &SeatMatrix, key: &str) -> ToggleOutcome {
        let keys: Vec<String> = match matrix.pair_of(key) {
            Some(pair) => vec![pair.left_key.clone(), pair.right_key.clone()],
            None => vec![key.to_string()],
        };
        self.selected.retain(|k| !keys.contains(k));
        ToggleOutcome::Deselected { keys }
    }
}
