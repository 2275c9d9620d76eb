pub mod actuator_task;
pub mod control_task;
pub mod sensor_task;
