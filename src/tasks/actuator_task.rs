use embassy_time::{Duration, Instant, Timer};
use num_traits::AsPrimitive;

use crate::config::hardware::safety;
use crate::config::hardware::system::ACTUATOR_UPDATE_RATE_HZ;
use crate::data::{DriveCommand, DriveMode, CHANNELS, SYSTEM_STATE};
use crate::drivers::actuators::Drivetrain;

/// Состояние исполнительных механизмов
struct ActuatorState {
    /// Последнее время обновления
    last_update: Instant,
    /// Счетчик циклов без команд
    failure_count: u32,
    /// Флаг аварийной остановки
    emergency_stop: bool,
    /// Последняя валидная команда
    last_valid_command: DriveCommand,
    /// Фактически установленное заполнение
    applied_duty: u8,
}

#[embassy_executor::task]
pub async fn task(mut drivetrain: Drivetrain) {
    defmt::info!("Запуск задачи управления приводами");

    // Инициализация состояния
    let mut state = ActuatorState {
        last_update: Instant::now(),
        failure_count: 0,
        emergency_stop: false,
        last_valid_command: DriveCommand::STOP,
        applied_duty: 0,
    };

    // Получаем приемник команд управления
    let mut drive_receiver = CHANNELS.drive_channel.receiver();

    // Основной цикл
    let mut ticker =
        embassy_time::Ticker::every(Duration::from_hz(ACTUATOR_UPDATE_RATE_HZ as u64));

    loop {
        ticker.next().await;

        // Проверка аварийного режима
        if let Ok(drive_mode) = SYSTEM_STATE.drive_mode.try_lock() {
            if *drive_mode == DriveMode::Emergency {
                state.emergency_stop = true;
            }
        }

        // Получение команды управления
        let command = match drive_receiver.try_receive() {
            Ok(cmd) => {
                state.failure_count = 0;
                state.last_valid_command = cmd;
                cmd
            }
            Err(_) => {
                // Контур управления медленнее цикла приводов,
                // держим последнюю валидную команду
                state.failure_count += 1;

                let loss_ticks = safety::COMMAND_LOSS_TIMEOUT_S * ACTUATOR_UPDATE_RATE_HZ;
                if state.failure_count > loss_ticks {
                    if state.failure_count == loss_ticks + 1 {
                        defmt::warn!("Потеря связи с контуром управления!");
                    }
                    DriveCommand::STOP
                } else {
                    state.last_valid_command
                }
            }
        };

        // Применение команд с учетом безопасности
        if state.emergency_stop {
            apply_safe_shutdown(&mut drivetrain, &mut state).await;
        } else {
            apply_drive_command(command, &mut drivetrain, &mut state);
        }

        *SYSTEM_STATE.last_command.lock().await = Some(DriveCommand {
            direction: command.direction,
            duty: state.applied_duty,
        });

        // Проверка состояния исполнительных механизмов
        check_actuator_health(&mut state).await;
    }
}

/// Применение команды к шасси
fn apply_drive_command(cmd: DriveCommand, drivetrain: &mut Drivetrain, state: &mut ActuatorState) {
    let dt_us: f32 = state.last_update.elapsed().as_micros().as_();
    let dt = dt_us / 1_000_000.0;
    state.last_update = Instant::now();

    // Ограничение скорости изменения заполнения (защита от рывков)
    let max_duty_change = safety::MAX_DUTY_RATE_PER_S * dt;
    let duty = smooth_value(state.applied_duty, cmd.duty, max_duty_change);

    let applied = DriveCommand {
        direction: cmd.direction,
        duty,
    };

    if let Err(e) = drivetrain.apply(applied) {
        defmt::error!("Ошибка приводов: {}", e);
    }
    state.applied_duty = duty;

    // Логирование для отладки
    #[cfg(feature = "debug-actuators")]
    print_drive_bar(&applied);
}

/// Безопасное отключение шасси
async fn apply_safe_shutdown(drivetrain: &mut Drivetrain, state: &mut ActuatorState) {
    // Плавное снижение заполнения
    if state.applied_duty > 0 {
        defmt::warn!("Применение безопасного отключения");

        let mut duty = state.applied_duty;
        while duty > 0 {
            duty = duty.saturating_sub(safety::SHUTDOWN_DUTY_STEP);

            let _ = drivetrain.apply(DriveCommand {
                direction: state.last_valid_command.direction,
                duty,
            });
            Timer::after(Duration::from_millis(50)).await;
        }

        state.applied_duty = 0;
    }

    // Полная остановка шасси
    if let Err(e) = drivetrain.stop() {
        defmt::error!("Ошибка остановки приводов: {}", e);
    }
}

/// Проверка состояния исполнительных механизмов
async fn check_actuator_health(state: &mut ActuatorState) {
    // Долгое молчание контура управления - авария
    let emergency_ticks = safety::COMMAND_EMERGENCY_TIMEOUT_S * ACTUATOR_UPDATE_RATE_HZ;

    if state.failure_count > emergency_ticks && !state.emergency_stop {
        defmt::error!("Критическая потеря команд управления!");

        if let Ok(mut mode) = SYSTEM_STATE.drive_mode.try_lock() {
            *mode = DriveMode::Emergency;
        }

        state.emergency_stop = true;
    }
}

/// Плавное изменение заполнения с ограничением скорости
fn smooth_value(current: u8, target: u8, max_change: f32) -> u8 {
    let diff = target as f32 - current as f32;

    if diff.abs() <= max_change {
        target
    } else {
        (current as f32 + max_change * diff.signum()) as u8
    }
}

/// Текстовая шкала мощности для отладки
#[cfg(feature = "debug-actuators")]
fn print_drive_bar(cmd: &DriveCommand) {
    use crate::config::control::telemetry::BAR_WIDTH;
    use crate::data::DriveDirection;
    use crate::utils::math::map_range;

    let bar_len = map_range(cmd.duty as f32, 0.0, 255.0, 0.0, BAR_WIDTH as f32) as usize;
    let mut bar: heapless::String<BAR_WIDTH> = heapless::String::new();

    let symbol = match cmd.direction {
        DriveDirection::Forward => '>',
        DriveDirection::Reverse => '<',
        DriveDirection::Stop => '0',
    };

    if bar_len == 0 || cmd.direction == DriveDirection::Stop {
        let _ = bar.push('0');
    } else {
        for _ in 0..bar_len {
            let _ = bar.push(symbol);
        }
    }

    defmt::debug!("PWM: {}", bar.as_str());
}
