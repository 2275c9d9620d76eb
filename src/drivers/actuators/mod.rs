pub mod motor;

pub use motor::{Drivetrain, Motor, MotorError};
