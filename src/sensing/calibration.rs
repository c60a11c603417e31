use crate::utils::voltage_monitor_error::AnalogInError;

/// An ADC able to run its own calibration routine
pub trait AdcCalibration {
    /// Asks the hardware to start calibrating. Must not block.
    fn request_calibration(&mut self) -> Result<(), AnalogInError>;

    /// True while the calibration requested last is still running
    fn calibration_in_progress(&self) -> bool;
}

/// Requests a calibration and spins until the hardware reports it finished.
/// There is no timeout: a calibration that never ends blocks forever.
///
/// # Arguments
///
/// - `adc`: The converter to calibrate
///
/// # Returns
///
/// A `Result` with the amount of polls spent waiting, or an `AnalogInError` if the
/// calibration could not be requested.
///
/// # Errors
///
/// - `AnalogInError::CalibrationError`: If the hardware refused the request
pub fn calibrate<C: AdcCalibration>(adc: &mut C) -> Result<u32, AnalogInError> {
    adc.request_calibration()?;
    let mut polls: u32 = 0;
    while adc.calibration_in_progress() {
        core::hint::spin_loop();
        polls = polls.saturating_add(1);
    }
    log::debug!("ADC calibration finished after {polls} polls");
    Ok(polls)
}

#[cfg(test)]
mod test {
    use std::cell::Cell;

    use super::*;

    /// Calibration that reports busy for a fixed amount of polls after being requested
    struct CountdownAdc {
        busy_polls: u32,
        remaining: Cell<u32>,
        requests: u32,
        refuse: bool,
    }

    impl CountdownAdc {
        fn new(busy_polls: u32) -> Self {
            CountdownAdc { busy_polls, remaining: Cell::new(0), requests: 0, refuse: false }
        }
    }

    impl AdcCalibration for CountdownAdc {
        fn request_calibration(&mut self) -> Result<(), AnalogInError> {
            if self.refuse {
                return Err(AnalogInError::CalibrationError);
            }
            self.requests += 1;
            self.remaining.set(self.busy_polls);
            Ok(())
        }

        fn calibration_in_progress(&self) -> bool {
            let remaining = self.remaining.get();
            if remaining == 0 {
                return false;
            }
            self.remaining.set(remaining - 1);
            true
        }
    }

    #[test]
    fn test0_blocks_until_hardware_clears_the_flag() {
        let mut adc = CountdownAdc::new(25);
        assert_eq!(calibrate(&mut adc), Ok(25));
        assert_eq!(adc.requests, 1);
        assert!(!adc.calibration_in_progress());
    }

    #[test]
    fn test1_immediate_completion() {
        let mut adc = CountdownAdc::new(0);
        assert_eq!(calibrate(&mut adc), Ok(0));
    }

    #[test]
    fn test2_refused_request_is_reported() {
        let mut adc = CountdownAdc::new(3);
        adc.refuse = true;
        assert_eq!(calibrate(&mut adc), Err(AnalogInError::CalibrationError));
        assert_eq!(adc.requests, 0);
    }
}
