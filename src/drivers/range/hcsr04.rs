//! Драйвер ультразвукового дальномера HC-SR04

use crate::config::hardware::ultrasonic::{
    ECHO_TIMEOUT, MAX_RANGE_CM, MIN_RANGE_CM, SETTLE_PULSE_US, SOUND_SPEED_CM_PER_US,
    TRIGGER_PULSE_US,
};
use embassy_rp::gpio::{Input, Output};
use embassy_time::{with_timeout, Duration, Instant, Timer};

/// Ошибки дальномера
#[derive(Debug)]
pub enum RangeError {
    /// Эхо не пришло за отведенное время
    EchoTimeout,
    /// Замер вне измеримого диапазона датчика
    OutOfRange,
}

impl defmt::Format for RangeError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            RangeError::EchoTimeout => defmt::write!(fmt, "HC-SR04: Echo timeout"),
            RangeError::OutOfRange => defmt::write!(fmt, "HC-SR04: Reading out of range"),
        }
    }
}

/// Драйвер HC-SR04
pub struct HcSr04 {
    /// Выход запускающего импульса
    trig: Output<'static>,
    /// Вход эха
    echo: Input<'static>,
}

impl HcSr04 {
    pub fn new(trig: Output<'static>, echo: Input<'static>) -> Self {
        Self { trig, echo }
    }

    /// Один замер дистанции (см)
    pub async fn measure(&mut self) -> Result<f32, RangeError> {
        // Запускающий импульс 10 мкс
        self.trig.set_low();
        Timer::after(Duration::from_micros(SETTLE_PULSE_US)).await;
        self.trig.set_high();
        Timer::after(Duration::from_micros(TRIGGER_PULSE_US)).await;
        self.trig.set_low();

        // Измеряем длительность эха
        with_timeout(ECHO_TIMEOUT, self.echo.wait_for_high())
            .await
            .map_err(|_| RangeError::EchoTimeout)?;
        let echo_start = Instant::now();

        with_timeout(ECHO_TIMEOUT, self.echo.wait_for_low())
            .await
            .map_err(|_| RangeError::EchoTimeout)?;
        let pulse_us = echo_start.elapsed().as_micros() as f32;

        // Пересчет времени полета звука в сантиметры
        let distance_cm = pulse_us * SOUND_SPEED_CM_PER_US / 2.0;

        if !(MIN_RANGE_CM..=MAX_RANGE_CM).contains(&distance_cm) {
            return Err(RangeError::OutOfRange);
        }

        Ok(distance_cm)
    }
}
