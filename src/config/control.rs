//! Конфигурация контура удержания дистанции

/// Параметры нечеткого регулятора
pub mod fuzzy {
    /// Целевая дистанция до препятствия (см)
    pub const TARGET_DISTANCE_CM: f32 = 10.0;

    /// Предел выходной мощности регулятора
    pub const OUTPUT_LIMIT: f32 = 200.0;

    /// Зона нечувствительности выхода (подавление дрожания вокруг нуля)
    pub const DEAD_ZONE: f32 = 20.0;
}

/// Пределы правдоподобия замеров
pub mod limits {
    /// Максимально правдоподобное изменение дистанции за цикл (см)
    pub const MAX_DELTA_CM: f32 = 50.0;
}

/// Настройки телеметрии
pub mod telemetry {
    /// Ширина текстовой шкалы мощности (символов)
    pub const BAR_WIDTH: usize = 20;
}
