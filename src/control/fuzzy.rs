//! Нечеткое ядро удержания дистанции
//!
//! Схема Такаги-Сугено нулевого порядка: антецеденты нечеткие,
//! консеквенты - константы мощности. Вход - дистанция (см) и ее
//! изменение за цикл опроса, выход - знаковая мощность приводов.

use crate::config::control::fuzzy::{DEAD_ZONE, OUTPUT_LIMIT};
use crate::utils::math::constrain;

/// Правило: принадлежность по дистанции, принадлежность по изменению
/// дистанции, постоянный выход правила
type Rule = (fn(f32) -> f32, fn(f32) -> f32, f32);

/// Таблица правил 4x3, в порядке вычисления исходного регулятора
const RULES: [Rule; 12] = [
    (mu_too_close, mu_approaching, -200.0),
    (mu_too_close, mu_stable, -100.0),
    (mu_too_close, mu_moving_away, 0.0),
    (mu_target, mu_stable, 0.0),
    (mu_target, mu_approaching, -100.0),
    (mu_target, mu_moving_away, 100.0),
    (mu_close, mu_approaching, -100.0),
    (mu_close, mu_stable, 0.0),
    (mu_close, mu_moving_away, 50.0),
    (mu_far, mu_approaching, 100.0),
    (mu_far, mu_stable, 200.0),
    (mu_far, mu_moving_away, 200.0),
];

/// "Слишком близко": 1.0 до 6 см, линейный спад к нулю на 8 см
pub fn mu_too_close(s: f32) -> f32 {
    if s <= 6.0 {
        1.0
    } else if s < 8.0 {
        (8.0 - s) / 2.0
    } else {
        0.0
    }
}

/// "Цель": гауссиана с пиком на 10 см
pub fn mu_target(s: f32) -> f32 {
    libm::expf(-(s - 10.0) * (s - 10.0) / 2.0)
}

/// "Близко": треугольник с вершиной на 15 см
pub fn mu_close(s: f32) -> f32 {
    if s < 10.0 {
        0.0
    } else if s <= 15.0 {
        (s - 10.0) / 5.0
    } else if s <= 20.0 {
        (20.0 - s) / 5.0
    } else {
        0.0
    }
}

/// "Далеко": подъем с 14 см, насыщение с 18 см
pub fn mu_far(s: f32) -> f32 {
    if s <= 14.0 {
        0.0
    } else if s < 18.0 {
        (s - 14.0) / 4.0
    } else {
        1.0
    }
}

/// "Приближается": насыщение при изменении быстрее -4 см за цикл.
/// Ветка рампы проверяется первой, порядок веток фиксирован.
pub fn mu_approaching(ds: f32) -> f32 {
    if ds >= -4.0 && ds < -1.0 {
        (-ds - 1.0) / 3.0
    } else if ds < -4.0 {
        1.0
    } else {
        0.0
    }
}

/// "Стабильно": гауссиана вокруг нулевого изменения
pub fn mu_stable(ds: f32) -> f32 {
    libm::expf(-ds * ds / 2.0)
}

/// "Удаляется": зеркально к "приближается"
pub fn mu_moving_away(ds: f32) -> f32 {
    if ds > 1.0 && ds <= 4.0 {
        (ds - 1.0) / 3.0
    } else if ds > 4.0 {
        1.0
    } else {
        0.0
    }
}

/// Вывод по всем правилам: сила правила - минимум двух степеней
/// принадлежности, итог - взвешенное среднее выходов.
/// Если ни одно правило не сработало, возвращается 0.0.
pub fn infer(s: f32, ds: f32) -> f32 {
    let mut sum_alpha_output = 0.0;
    let mut sum_alpha = 0.0;

    for (mu_s, mu_ds, output) in RULES {
        let alpha = mu_s(s).min(mu_ds(ds));
        sum_alpha_output += alpha * output;
        sum_alpha += alpha;
    }

    if sum_alpha > 0.0 {
        sum_alpha_output / sum_alpha
    } else {
        0.0
    }
}

/// Итоговая мощность приводов: вывод, ограничение диапазона
/// и зона нечувствительности вокруг нуля
pub fn drive_power(s: f32, ds: f32) -> f32 {
    let power = constrain(infer(s, ds), -OUTPUT_LIMIT, OUTPUT_LIMIT);

    if power.abs() < DEAD_ZONE {
        0.0
    } else {
        power
    }
}

// Тесты для отладки на хосте
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_in_unit_range() {
        let functions: [fn(f32) -> f32; 7] = [
            mu_too_close,
            mu_target,
            mu_close,
            mu_far,
            mu_approaching,
            mu_stable,
            mu_moving_away,
        ];

        for f in functions {
            for i in 0..=10_000 {
                let x = -50.0 + i as f32 * 0.01;
                let y = f(x);
                assert!((0.0..=1.0).contains(&y));
            }
        }
    }

    #[test]
    fn test_gaussian_peaks() {
        assert_eq!(mu_target(10.0), 1.0);
        assert_eq!(mu_stable(0.0), 1.0);
    }

    #[test]
    fn test_too_close_boundaries() {
        assert_eq!(mu_too_close(6.0), 1.0);
        assert_eq!(mu_too_close(7.0), 0.5);
        assert_eq!(mu_too_close(8.0), 0.0);
    }

    #[test]
    fn test_close_boundaries() {
        assert_eq!(mu_close(10.0), 0.0);
        assert_eq!(mu_close(12.5), 0.5);
        assert_eq!(mu_close(15.0), 1.0);
        assert_eq!(mu_close(20.0), 0.0);
    }

    #[test]
    fn test_far_boundaries() {
        assert_eq!(mu_far(14.0), 0.0);
        assert_eq!(mu_far(16.0), 0.5);
        assert_eq!(mu_far(18.0), 1.0);
    }

    #[test]
    fn test_approaching_boundaries() {
        assert_eq!(mu_approaching(-4.0), 1.0);
        assert_eq!(mu_approaching(-2.5), 0.5);
        assert_eq!(mu_approaching(-1.0), 0.0);
    }

    #[test]
    fn test_moving_away_boundaries() {
        assert_eq!(mu_moving_away(1.0), 0.0);
        assert_eq!(mu_moving_away(2.5), 0.5);
        assert_eq!(mu_moving_away(4.0), 1.0);
    }

    #[test]
    fn test_at_target_and_stable() {
        // Правило "цель & стабильно" доминирует с силой ~1
        assert_eq!(drive_power(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_too_close_and_approaching() {
        assert!(drive_power(5.0, -5.0) < -199.0);
    }

    #[test]
    fn test_far_and_moving_away() {
        let power = drive_power(20.0, 5.0);
        assert!(power > 199.0);
        assert!(power <= 200.0);
    }

    #[test]
    fn test_dead_zone_forces_exact_zero() {
        // Слабый выход "далеко & стабильно" дает |вывод| < 20
        let raw = infer(14.2, 0.0);
        assert!(raw > 0.0 && raw < 20.0);
        assert_eq!(drive_power(14.2, 0.0), 0.0);
    }

    #[test]
    fn test_output_range_random() {
        let mut seed: u32 = 0x1234_5678;
        let mut next = move || {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            seed as f32 / u32::MAX as f32
        };

        for _ in 0..10_000 {
            let s = next() * 200.0 - 100.0;
            let ds = next() * 60.0 - 30.0;
            let power = drive_power(s, ds);

            assert!(power == 0.0 || (20.0..=200.0).contains(&power.abs()));
        }
    }

    #[test]
    fn test_determinism() {
        let first = drive_power(7.3, -2.1);
        let second = drive_power(7.3, -2.1);
        assert_eq!(first.to_bits(), second.to_bits());
    }
}
