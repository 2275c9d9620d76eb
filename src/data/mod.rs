// src/data/mod.rs
use core::sync::atomic::AtomicBool;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;

/// Размеры буферов каналов
const SENSOR_CHANNEL_SIZE: usize = 10;
const DRIVE_CHANNEL_SIZE: usize = 5;

/// Данные дальномера
#[derive(Clone, Copy, Debug)]
pub struct RangeData {
    pub distance_cm: f32, // Дистанция до препятствия (см)
    pub delta_cm: f32,    // Изменение дистанции с прошлого замера (см)
    pub timestamp_us: u64,
}

/// Направление движения шасси
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DriveDirection {
    /// К препятствию
    Forward,
    /// От препятствия
    Reverse,
    Stop,
}

/// Команда приводам
#[derive(Clone, Copy, Debug)]
pub struct DriveCommand {
    pub direction: DriveDirection,
    pub duty: u8, // Заполнение ШИМ (0 - 255)
}

impl DriveCommand {
    /// Команда полной остановки
    pub const STOP: Self = Self {
        direction: DriveDirection::Stop,
        duty: 0,
    };
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DriveMode {
    Disarmed,
    /// Активное удержание дистанции
    Keeping,
    Emergency,
}

/// Общее состояние системы (для быстрого доступа без блокировок)
pub struct SystemState {
    pub armed: AtomicBool,
    pub drive_mode: Mutex<CriticalSectionRawMutex, DriveMode>,
    pub last_range: Mutex<CriticalSectionRawMutex, Option<RangeData>>,
    pub last_command: Mutex<CriticalSectionRawMutex, Option<DriveCommand>>,
}

/// Каналы для передачи данных между задачами
pub struct DataChannels {
    // Канал от дальномера к контуру управления
    pub range_channel: Channel<CriticalSectionRawMutex, RangeData, SENSOR_CHANNEL_SIZE>,

    // Канал команд приводам
    pub drive_channel: Channel<CriticalSectionRawMutex, DriveCommand, DRIVE_CHANNEL_SIZE>,
}

impl DataChannels {
    pub const fn new() -> Self {
        Self {
            range_channel: Channel::new(),
            drive_channel: Channel::new(),
        }
    }
}

impl SystemState {
    pub const fn new() -> Self {
        Self {
            armed: AtomicBool::new(false),
            drive_mode: Mutex::new(DriveMode::Disarmed),
            last_range: Mutex::new(None),
            last_command: Mutex::new(None),
        }
    }

    /// Проверка готовности системы к движению
    pub async fn is_ready_for_drive(&self) -> bool {
        self.last_range.lock().await.is_some()
    }
}

// Статические экземпляры для глобального доступа
pub static CHANNELS: DataChannels = DataChannels::new();
pub static SYSTEM_STATE: SystemState = SystemState::new();
