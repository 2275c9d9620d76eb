#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::Pwm;
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

mod config;
mod control;
mod data;
mod drivers;
mod sensors;
mod tasks;
mod utils;

use crate::data::{DriveMode, SYSTEM_STATE};
use crate::drivers::actuators::{Drivetrain, Motor};
use crate::drivers::range::HcSr04;
use crate::tasks::*;
use utils::system_info;

/// Точка входа в программу
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // Инициализация HAL Raspberry Pi Pico
    let p = embassy_rp::init(Default::default());

    defmt::info!("=== Робот удержания дистанции v0.1.0 ===");
    defmt::info!("Инициализация системы...");
    // Вывод информации о частотах
    system_info::print_clock_info();

    // Проверка корректности частот
    if let Err(e) = system_info::validate_clocks() {
        defmt::error!("Ошибка конфигурации частот: {}", e);
        panic!("Invalid clock configuration");
    }

    // Настройка светодиода для индикации состояния
    let mut led = Output::new(p.PIN_25, Level::Low);

    // Мигаем светодиодом при старте
    for _ in 0..3 {
        led.set_high();
        Timer::after(Duration::from_millis(100)).await;
        led.set_low();
        Timer::after(Duration::from_millis(100)).await;
    }

    // Ультразвуковой дальномер HC-SR04
    let range_sensor = {
        let trig = Output::new(p.PIN_2, Level::Low); // GPIO2 - TRIG
        let echo = Input::new(p.PIN_3, Pull::Down); // GPIO3 - ECHO

        HcSr04::new(trig, echo)
    };

    // Левый мотор: IN1/IN2 + ШИМ на ENA
    let motor_left = {
        let in1 = Output::new(p.PIN_6, Level::Low); // GPIO6 - IN1
        let in2 = Output::new(p.PIN_7, Level::Low); // GPIO7 - IN2
        let pwm = Pwm::new_output_b(p.PWM_SLICE4, p.PIN_9, Default::default()); // GPIO9 - ENA

        Motor::new(in1, in2, pwm, false)
    };

    // Правый мотор подключен к H-мосту зеркально
    let motor_right = {
        let in3 = Output::new(p.PIN_5, Level::Low); // GPIO5 - IN3
        let in4 = Output::new(p.PIN_4, Level::Low); // GPIO4 - IN4
        let pwm = Pwm::new_output_a(p.PWM_SLICE5, p.PIN_10, Default::default()); // GPIO10 - ENB

        Motor::new(in3, in4, pwm, true)
    };

    let mut drivetrain = Drivetrain::new(motor_left, motor_right);
    if let Err(e) = drivetrain.init() {
        defmt::error!("Ошибка инициализации приводов: {}", e);
        panic!("Drivetrain init failed");
    }

    #[cfg(feature = "calibrate-motors")]
    if let Err(e) = drivetrain.calibrate().await {
        defmt::error!("Ошибка калибровки приводов: {}", e);
    }

    // Устанавливаем начальный режим
    *SYSTEM_STATE.drive_mode.lock().await = DriveMode::Disarmed;

    // Запуск асинхронных задач
    defmt::info!("Запуск задач...");

    // Задача опроса дальномера
    spawner.spawn(sensor_task::task(range_sensor)).unwrap();

    // Задача контура удержания дистанции
    spawner.spawn(control_task::task()).unwrap();

    // Задача управления приводами
    spawner.spawn(actuator_task::task(drivetrain)).unwrap();

    defmt::info!("Система инициализирована. Ожидание готовности дальномера...");

    // Ждем первый валидный замер
    loop {
        if SYSTEM_STATE.is_ready_for_drive().await {
            defmt::info!("Все подсистемы готовы к работе!");
            break;
        }
        Timer::after(Duration::from_millis(500)).await;
    }

    // Переходим в режим удержания дистанции
    *SYSTEM_STATE.drive_mode.lock().await = DriveMode::Keeping;

    // Основной цикл для обработки команд высокого уровня
    loop {
        // Проверяем режим и выполняем соответствующие действия
        let mode = *SYSTEM_STATE.drive_mode.lock().await;

        match mode {
            DriveMode::Disarmed => {
                // Ждем взведения из контура управления
            }
            DriveMode::Keeping => {
                // Удержание дистанции идет в control_task
                led.toggle();
            }
            DriveMode::Emergency => {
                defmt::error!("АВАРИЙНЫЙ РЕЖИМ! Остановка приводов!");
                // Переключаем все системы в безопасный режим
                SYSTEM_STATE
                    .armed
                    .store(false, core::sync::atomic::Ordering::Relaxed);
                led.set_high();
            }
        }

        // Главный цикл выполняется с низкой частотой
        Timer::after(Duration::from_millis(100)).await;
    }
}
