mod calibration;
mod conversion;
mod filter;

pub use calibration::*;
pub use conversion::*;
pub use filter::*;

use crate::utils::voltage_monitor_error::AnalogInError;

/// An analog input producing 12 bit ADC codes
pub trait AnalogSource {
    /// Reads one code. For the 12 bit converter the code is in [0, 4095].
    fn read_raw(&mut self) -> Result<u16, AnalogInError>;
}
