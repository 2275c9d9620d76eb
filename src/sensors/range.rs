//! Обработка замеров дальномера

use crate::utils::filters::MedianFilter;

/// Размер окна медианного фильтра дистанции
const MEDIAN_WINDOW: usize = 3;

/// Обработчик замеров: фильтрация выбросов и расчет изменения
/// дистанции между циклами опроса
pub struct RangeProcessor {
    /// Фильтр одиночных выбросов ультразвука
    distance_filter: MedianFilter<MEDIAN_WINDOW>,
    /// Дистанция прошлого цикла
    last_distance: Option<f32>,
}

impl RangeProcessor {
    pub fn new() -> Self {
        Self {
            distance_filter: MedianFilter::new(),
            last_distance: None,
        }
    }

    /// Обработка нового замера: (дистанция, изменение за цикл).
    /// Первый замер после сброса дает нулевое изменение.
    pub fn update(&mut self, raw_cm: f32) -> (f32, f32) {
        let distance = self.distance_filter.filter(raw_cm);

        let delta = match self.last_distance {
            Some(previous) => distance - previous,
            None => 0.0,
        };
        self.last_distance = Some(distance);

        (distance, delta)
    }

    /// Сброс истории замеров
    pub fn reset(&mut self) {
        self.distance_filter.reset();
        self.last_distance = None;
    }
}

// Тесты для отладки на хосте
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_zero_delta() {
        let mut processor = RangeProcessor::new();

        let (distance, delta) = processor.update(10.0);
        assert_eq!(distance, 10.0);
        assert_eq!(delta, 0.0);
    }

    #[test]
    fn test_delta_tracking() {
        let mut processor = RangeProcessor::new();
        processor.update(10.0);
        processor.update(10.0);

        // Окно [10, 10, 12] - медиана еще 10
        let (distance, delta) = processor.update(12.0);
        assert_eq!(distance, 10.0);
        assert_eq!(delta, 0.0);

        // Окно [10, 12, 12] - медиана догоняет замеры
        let (distance, delta) = processor.update(12.0);
        assert_eq!(distance, 12.0);
        assert_eq!(delta, 2.0);
    }

    #[test]
    fn test_spike_rejection() {
        let mut processor = RangeProcessor::new();
        processor.update(10.0);
        processor.update(10.0);

        // Одиночный выброс не попадает ни в дистанцию, ни в дельту
        let (distance, delta) = processor.update(400.0);
        assert_eq!(distance, 10.0);
        assert_eq!(delta, 0.0);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut processor = RangeProcessor::new();
        processor.update(10.0);
        processor.update(15.0);

        processor.reset();
        let (distance, delta) = processor.update(30.0);
        assert_eq!(distance, 30.0);
        assert_eq!(delta, 0.0);
    }
}
