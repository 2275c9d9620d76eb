pub(crate) mod hcsr04;

pub use hcsr04::{HcSr04, RangeError};
