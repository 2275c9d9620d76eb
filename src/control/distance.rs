//! Контроллер удержания дистанции

use crate::config::control::limits;
use crate::control::fuzzy;
use crate::data::{DriveCommand, DriveDirection, RangeData};
use crate::utils::math::constrain;

/// Контроллер: нечеткое ядро плюс преобразование мощности в команду шасси
pub struct DistanceController {
    /// Последняя рассчитанная мощность (для телеметрии)
    last_power: f32,
}

impl DistanceController {
    pub fn new() -> Self {
        Self { last_power: 0.0 }
    }

    /// Расчет команды приводам по данным дальномера
    pub fn calculate(&mut self, range: &RangeData) -> DriveCommand {
        let power = fuzzy::drive_power(range.distance_cm, range.delta_cm);
        self.last_power = power;

        Self::power_to_command(power)
    }

    /// Знак мощности задает направление, модуль - заполнение ШИМ.
    /// Заполнение ограничивается 8-битной шкалой без пересчета диапазона.
    fn power_to_command(power: f32) -> DriveCommand {
        let direction = if power > 0.0 {
            DriveDirection::Forward
        } else if power < 0.0 {
            DriveDirection::Reverse
        } else {
            DriveDirection::Stop
        };

        DriveCommand {
            direction,
            duty: constrain(power.abs(), 0.0, 255.0) as u8,
        }
    }

    /// Проверка правдоподобия замера перед расчетом
    pub fn check_range_limits(&self, range: &RangeData) -> bool {
        if range.delta_cm.abs() > limits::MAX_DELTA_CM {
            defmt::warn!(
                "Неправдоподобное изменение дистанции: {} см за цикл",
                range.delta_cm
            );
            return false;
        }

        true
    }

    /// Последняя мощность (для телеметрии)
    pub fn last_power(&self) -> f32 {
        self.last_power
    }
}

// Тесты для отладки на хосте
#[cfg(test)]
mod tests {
    use super::*;

    fn range(distance_cm: f32, delta_cm: f32) -> RangeData {
        RangeData {
            distance_cm,
            delta_cm,
            timestamp_us: 0,
        }
    }

    #[test]
    fn test_stop_at_target() {
        let mut controller = DistanceController::new();

        let command = controller.calculate(&range(10.0, 0.0));
        assert_eq!(command.direction, DriveDirection::Stop);
        assert_eq!(command.duty, 0);
        assert_eq!(controller.last_power(), 0.0);
    }

    #[test]
    fn test_reverse_when_too_close() {
        let mut controller = DistanceController::new();

        let command = controller.calculate(&range(5.0, -5.0));
        assert_eq!(command.direction, DriveDirection::Reverse);
        assert!(command.duty >= 199);
    }

    #[test]
    fn test_forward_when_far() {
        let mut controller = DistanceController::new();

        let command = controller.calculate(&range(20.0, 5.0));
        assert_eq!(command.direction, DriveDirection::Forward);
        assert!(command.duty >= 199);
    }

    #[test]
    fn test_duty_never_exceeds_scale() {
        let mut controller = DistanceController::new();

        // Мощность ограничена 200, заполнение не достигает 255
        let command = controller.calculate(&range(100.0, 10.0));
        assert!(command.duty <= 200);
    }
}
