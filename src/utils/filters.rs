//! Цифровые фильтры для обработки сигналов

use crate::utils::math::median;
use heapless::Vec;

/// Медианный фильтр для подавления выбросов
#[derive(Debug, Clone)]
pub struct MedianFilter<const N: usize> {
    window: Vec<f32, N>,
}

impl<const N: usize> MedianFilter<N> {
    /// Создание нового медианного фильтра
    pub fn new() -> Self {
        Self { window: Vec::new() }
    }

    /// Добавление замера и получение медианы окна
    pub fn filter(&mut self, input: f32) -> f32 {
        if self.window.len() >= N {
            self.window.remove(0);
        }
        let _ = self.window.push(input);

        let mut scratch: Vec<f32, N> = self.window.clone();
        median(scratch.as_mut_slice())
    }

    /// Сброс фильтра
    pub fn reset(&mut self) {
        self.window.clear();
    }
}

// Модульные тесты
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_filter_window() {
        let mut filter = MedianFilter::<3>::new();

        assert_eq!(filter.filter(1.0), 1.0);
        assert_eq!(filter.filter(5.0), 3.0);
        assert_eq!(filter.filter(3.0), 3.0);
        // Окно [5, 3, 100] - выброс подавлен
        assert_eq!(filter.filter(100.0), 5.0);
    }

    #[test]
    fn test_median_filter_reset() {
        let mut filter = MedianFilter::<3>::new();
        filter.filter(10.0);
        filter.filter(20.0);

        filter.reset();
        assert_eq!(filter.filter(7.0), 7.0);
    }
}
