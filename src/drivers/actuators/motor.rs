//! Драйвер коллекторных моторов через H-мост (L298N)

use crate::config::hardware::motor_pwm::{DUTY_MAX, PWM_TOP};
use crate::data::{DriveCommand, DriveDirection};
use embassy_rp::gpio::Output;
use embassy_rp::pwm::{Config as PwmConfig, Pwm, SetDutyCycle};
use embassy_time::{Duration, Timer};

/// Ошибки работы с приводом
#[derive(Debug)]
pub enum MotorError {
    /// Ошибка установки заполнения ШИМ
    PwmError,
}

impl defmt::Format for MotorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            MotorError::PwmError => defmt::write!(fmt, "Motor: PWM error"),
        }
    }
}

/// Один мотор: два входа направления H-моста и канал ШИМ на вход разрешения
pub struct Motor {
    /// Вход прямого направления
    in_fwd: Output<'static>,
    /// Вход обратного направления
    in_rev: Output<'static>,
    /// ШИМ канал (ENA/ENB)
    pwm: Pwm<'static>,
    /// Мотор подключен зеркально
    inverted: bool,
}

impl Motor {
    pub fn new(
        in_fwd: Output<'static>,
        in_rev: Output<'static>,
        pwm: Pwm<'static>,
        inverted: bool,
    ) -> Self {
        Self {
            in_fwd,
            in_rev,
            pwm,
            inverted,
        }
    }

    /// Настройка ШИМ 20 кГц и остановка мотора
    pub fn init(&mut self) -> Result<(), MotorError> {
        let mut config = PwmConfig::default();
        config.divider = 1.into();
        config.top = PWM_TOP;
        self.pwm.set_config(&config);

        self.apply(DriveDirection::Stop, 0)
    }

    /// Установка направления и заполнения (0 - 255)
    pub fn apply(&mut self, direction: DriveDirection, duty: u8) -> Result<(), MotorError> {
        let direction = if self.inverted {
            match direction {
                DriveDirection::Forward => DriveDirection::Reverse,
                DriveDirection::Reverse => DriveDirection::Forward,
                DriveDirection::Stop => DriveDirection::Stop,
            }
        } else {
            direction
        };

        match direction {
            DriveDirection::Forward => {
                self.in_fwd.set_high();
                self.in_rev.set_low();
            }
            DriveDirection::Reverse => {
                self.in_fwd.set_low();
                self.in_rev.set_high();
            }
            DriveDirection::Stop => {
                self.in_fwd.set_low();
                self.in_rev.set_low();
            }
        }

        self.set_duty(duty)
    }

    /// Пересчет 8-битного заполнения в счетчик ШИМ
    fn set_duty(&mut self, duty: u8) -> Result<(), MotorError> {
        let scaled =
            (duty as u32 * self.pwm.max_duty_cycle() as u32 / DUTY_MAX as u32) as u16;

        self.pwm
            .set_duty_cycle(scaled)
            .map_err(|_| MotorError::PwmError)
    }
}

/// Пара моторов шасси с общей командой
pub struct Drivetrain {
    left: Motor,
    right: Motor,
}

impl Drivetrain {
    pub fn new(left: Motor, right: Motor) -> Self {
        Self { left, right }
    }

    /// Настройка обоих моторов
    pub fn init(&mut self) -> Result<(), MotorError> {
        self.left.init()?;
        self.right.init()
    }

    /// Применение команды к обоим моторам (общее заполнение)
    pub fn apply(&mut self, command: DriveCommand) -> Result<(), MotorError> {
        self.left.apply(command.direction, command.duty)?;
        self.right.apply(command.direction, command.duty)
    }

    /// Полная остановка шасси
    pub fn stop(&mut self) -> Result<(), MotorError> {
        self.apply(DriveCommand::STOP)
    }

    /// Калибровочная прокрутка: плавный разгон и остановка в обе стороны
    pub async fn calibrate(&mut self) -> Result<(), MotorError> {
        defmt::info!("Начало калибровки приводов");

        for direction in [DriveDirection::Forward, DriveDirection::Reverse] {
            for duty in (0..=120u8).step_by(10) {
                self.apply(DriveCommand { direction, duty })?;
                Timer::after(Duration::from_millis(100)).await;
            }

            self.stop()?;
            Timer::after(Duration::from_millis(500)).await;
        }

        defmt::info!("Калибровка завершена");
        Ok(())
    }
}
