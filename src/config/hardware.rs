//! Конфигурация аппаратного обеспечения робота

/// Конфигурация пинов GPIO
pub mod pins {
    /// Ультразвуковой дальномер HC-SR04
    pub mod ultrasonic {
        /// Пин запускающего импульса
        pub const TRIG_PIN: u8 = 2; // GPIO2

        /// Пин эха
        pub const ECHO_PIN: u8 = 3; // GPIO3
    }

    /// H-мост приводов (L298N)
    pub mod motors {
        /// Прямой вход левого мотора (IN1)
        pub const LEFT_IN1_PIN: u8 = 6; // GPIO6

        /// Обратный вход левого мотора (IN2)
        pub const LEFT_IN2_PIN: u8 = 7; // GPIO7

        /// Прямой вход правого мотора (IN3)
        pub const RIGHT_IN3_PIN: u8 = 5; // GPIO5

        /// Обратный вход правого мотора (IN4)
        pub const RIGHT_IN4_PIN: u8 = 4; // GPIO4

        /// ШИМ левого мотора (ENA)
        pub const LEFT_EN_PIN: u8 = 9; // GPIO9 - PWM4B

        /// ШИМ правого мотора (ENB)
        pub const RIGHT_EN_PIN: u8 = 10; // GPIO10 - PWM5A
    }

    /// Дополнительные пины
    pub mod misc {
        /// Встроенный светодиод на Pico
        pub const LED_PIN: u8 = 25; // GPIO25
    }
}

/// Конфигурация ультразвукового дальномера
pub mod ultrasonic {
    use embassy_time::Duration;

    /// Пауза с низким уровнем перед запускающим импульсом (мкс)
    pub const SETTLE_PULSE_US: u64 = 2;

    /// Длительность запускающего импульса (мкс)
    pub const TRIGGER_PULSE_US: u64 = 10;

    /// Таймаут ожидания эха
    pub const ECHO_TIMEOUT: Duration = Duration::from_millis(30);

    /// Скорость звука (см/мкс)
    pub const SOUND_SPEED_CM_PER_US: f32 = 0.0343;

    /// Минимальная измеримая дистанция (см)
    pub const MIN_RANGE_CM: f32 = 2.0;

    /// Максимальная измеримая дистанция (см)
    pub const MAX_RANGE_CM: f32 = 400.0;
}

/// Конфигурация ШИМ приводов
pub mod motor_pwm {
    /// Частота ШИМ (Гц)
    pub const PWM_FREQUENCY_HZ: u32 = 20_000;

    /// Верхнее значение счетчика ШИМ: 125 МГц / 20 кГц - 1
    pub const PWM_TOP: u16 = 6249;

    /// Максимальное заполнение команды (8-битная шкала)
    pub const DUTY_MAX: u8 = 255;
}

/// Параметры системы
pub mod system {
    /// Частота опроса дальномера (Гц)
    pub const RANGE_SAMPLE_RATE_HZ: u32 = 10;

    /// Частота контура управления (Гц)
    pub const CONTROL_LOOP_RATE_HZ: u32 = 10;

    /// Частота обновления приводов (Гц)
    pub const ACTUATOR_UPDATE_RATE_HZ: u32 = 50;
}

/// Лимиты безопасности
pub mod safety {
    /// Время непрерывных ошибок дальномера до аварийного режима (с)
    pub const SENSOR_FAILURE_TIMEOUT_S: u32 = 2;

    /// Время без команд до остановки приводов (с)
    pub const COMMAND_LOSS_TIMEOUT_S: u32 = 1;

    /// Время без команд до аварийного режима (с)
    pub const COMMAND_EMERGENCY_TIMEOUT_S: u32 = 3;

    /// Максимальная скорость изменения заполнения ШИМ (единиц/с)
    pub const MAX_DUTY_RATE_PER_S: f32 = 1020.0;

    /// Шаг снижения заполнения при аварийной остановке
    pub const SHUTDOWN_DUTY_STEP: u8 = 25;
}
