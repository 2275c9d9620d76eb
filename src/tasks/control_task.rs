// src/tasks/control_task.rs
use embassy_time::Duration;

use crate::config::control::fuzzy::TARGET_DISTANCE_CM;
use crate::config::hardware::system::CONTROL_LOOP_RATE_HZ;
use crate::control::distance::DistanceController;
use crate::data::{DriveCommand, DriveMode, CHANNELS, SYSTEM_STATE};

#[embassy_executor::task]
pub async fn task() {
    // Инициализация контроллера
    let mut controller = DistanceController::new();

    // Получаем приемник замеров и отправитель команд
    let mut range_receiver = CHANNELS.range_channel.receiver();
    let drive_sender = CHANNELS.drive_channel.sender();

    let mut ticker = embassy_time::Ticker::every(Duration::from_hz(CONTROL_LOOP_RATE_HZ as u64));
    let mut armed_count = 0;

    loop {
        ticker.next().await;

        let drive_mode = *SYSTEM_STATE.drive_mode.lock().await;
        armed_count += 1;

        // Пока система не взведена, шлем остановку
        if !SYSTEM_STATE.armed.load(core::sync::atomic::Ordering::Relaxed) {
            let _ = drive_sender.try_send(DriveCommand::STOP);

            // Через секунду после старта приводы считаются готовыми
            if armed_count > CONTROL_LOOP_RATE_HZ {
                SYSTEM_STATE
                    .armed
                    .store(true, core::sync::atomic::Ordering::Relaxed);
            }

            continue;
        }

        // Последний замер дальномера (неблокирующий вариант)
        if let Ok(range_data) = range_receiver.try_receive() {
            let command = match drive_mode {
                DriveMode::Keeping => {
                    if !controller.check_range_limits(&range_data) {
                        continue;
                    }

                    let command = controller.calculate(&range_data);

                    // Телеметрия контура: дистанция, изменение, мощность
                    defmt::debug!(
                        "Дистанция: {} см (цель {}), дельта: {} см, мощность: {}",
                        range_data.distance_cm,
                        TARGET_DISTANCE_CM,
                        range_data.delta_cm,
                        controller.last_power(),
                    );

                    command
                }
                _ => {
                    // Безопасные значения по умолчанию
                    DriveCommand::STOP
                }
            };

            // Отправляем команду приводам
            if let Err(_) = drive_sender.try_send(command) {
                defmt::warn!("Буфер команд приводов переполнен");
            }
        }
    }
}
