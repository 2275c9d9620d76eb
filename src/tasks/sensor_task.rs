use embassy_time::{Duration, Instant};

use crate::config::hardware::safety::SENSOR_FAILURE_TIMEOUT_S;
use crate::config::hardware::system::RANGE_SAMPLE_RATE_HZ;
use crate::data::{DriveMode, RangeData, CHANNELS, SYSTEM_STATE};
use crate::drivers::range::HcSr04;
use crate::sensors::RangeProcessor;

#[embassy_executor::task]
pub async fn task(mut sensor: HcSr04) {
    defmt::info!("Запуск задачи опроса дальномера");

    let mut processor = RangeProcessor::new();

    // Получаем отправитель канала
    let range_sender = CHANNELS.range_channel.sender();

    // === Основной цикл опроса ===
    let mut ticker = embassy_time::Ticker::every(Duration::from_hz(RANGE_SAMPLE_RATE_HZ as u64));
    let mut error_count: u32 = 0;

    loop {
        ticker.next().await;
        let current_time = Instant::now();

        match sensor.measure().await {
            Ok(raw_cm) => {
                error_count = 0;

                // Фильтрация и расчет изменения дистанции
                let (distance_cm, delta_cm) = processor.update(raw_cm);

                let range_data = RangeData {
                    distance_cm,
                    delta_cm,
                    timestamp_us: current_time.as_micros(),
                };

                // Обновляем глобальное состояние
                *SYSTEM_STATE.last_range.lock().await = Some(range_data);

                if let Err(_) = range_sender.try_send(range_data) {
                    // Контур управления не успевает, пропуск замера не критичен
                }

                #[cfg(feature = "debug-sensors")]
                defmt::debug!("Дальномер: {} см (сырое {} см)", distance_cm, raw_cm);
            }
            Err(e) => {
                defmt::error!("Ошибка чтения дальномера: {}", e);
                error_count += 1;

                // При длительном отказе датчика движение небезопасно
                if error_count >= SENSOR_FAILURE_TIMEOUT_S * RANGE_SAMPLE_RATE_HZ {
                    defmt::error!("Дальномер не отвечает, переход в аварийный режим");
                    *SYSTEM_STATE.drive_mode.lock().await = DriveMode::Emergency;
                    error_count = 0;
                }
            }
        }
    }
}
