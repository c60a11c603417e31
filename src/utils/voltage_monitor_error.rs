#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::{esp_err_t, EspError, ESP_ERR_INVALID_ARG, ESP_ERR_INVALID_STATE, ESP_ERR_NO_MEM, ESP_ERR_NOT_FOUND};

/// Errors when a peripheral is requested in a way it cannot be handed out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeripheralError {
    AlreadyTaken,
    NotAPin,
}

/// Enums the different errors possible when starting the shared ADC driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdcDriverError {
    AlreadyTaken,
    ClockError,
    InvalidArg,
    NoMemory,
    Other,
}

/// Enums the different errors possible when working with the analog in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalogInError {
    AdcDriverError(AdcDriverError),
    CalibrationError,
    CannotSetPull,
    ChannelCreationError,
    ErrorReading,
    InvalidPeripheral(PeripheralError),
    InvalidPin,
}

/// Enums the different errors possible when working with the UART
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UARTError {
    IncompleteWrite,
    InvalidPeripheral(PeripheralError),
    InvalidPin,
    InvalidUartNumber,
    WriteError,
}

/// Enums the different errors possible when building or reading report lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    InvalidPrecision,
    InvalidValue(String),
    MissingLabel(String),
    UnsupportedSpecifier(char),
    WrongFieldCount(usize),
}

/// Every error the monitor can stop on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoltageMonitorError {
    AnalogInError(AnalogInError),
    ReportError(ReportError),
    UARTError(UARTError),
}

impl From<PeripheralError> for AnalogInError {
    fn from(value: PeripheralError) -> Self {
        AnalogInError::InvalidPeripheral(value)
    }
}

impl From<AdcDriverError> for AnalogInError {
    fn from(value: AdcDriverError) -> Self {
        AnalogInError::AdcDriverError(value)
    }
}

impl From<PeripheralError> for UARTError {
    fn from(value: PeripheralError) -> Self {
        UARTError::InvalidPeripheral(value)
    }
}

impl From<AnalogInError> for VoltageMonitorError {
    fn from(value: AnalogInError) -> Self {
        VoltageMonitorError::AnalogInError(value)
    }
}

impl From<ReportError> for VoltageMonitorError {
    fn from(value: ReportError) -> Self {
        VoltageMonitorError::ReportError(value)
    }
}

impl From<UARTError> for VoltageMonitorError {
    fn from(value: UARTError) -> Self {
        VoltageMonitorError::UARTError(value)
    }
}

#[cfg(target_os = "espidf")]
impl From<EspError> for AdcDriverError {
    fn from(value: EspError) -> Self {
        match value.code() {
            code if code == ESP_ERR_INVALID_ARG as esp_err_t => AdcDriverError::InvalidArg,
            code if code == ESP_ERR_NO_MEM as esp_err_t => AdcDriverError::NoMemory,
            code if code == ESP_ERR_NOT_FOUND as esp_err_t => AdcDriverError::AlreadyTaken,
            code if code == ESP_ERR_INVALID_STATE as esp_err_t => AdcDriverError::ClockError,
            _ => AdcDriverError::Other,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test0_peripheral_errors_keep_their_cause() {
        let err: AnalogInError = PeripheralError::AlreadyTaken.into();
        assert_eq!(err, AnalogInError::InvalidPeripheral(PeripheralError::AlreadyTaken));

        let err: UARTError = PeripheralError::NotAPin.into();
        assert_eq!(err, UARTError::InvalidPeripheral(PeripheralError::NotAPin));
    }

    #[test]
    fn test1_driver_errors_lift_into_monitor_error() {
        let err: VoltageMonitorError = AnalogInError::from(AdcDriverError::NoMemory).into();
        assert_eq!(
            err,
            VoltageMonitorError::AnalogInError(AnalogInError::AdcDriverError(AdcDriverError::NoMemory))
        );

        let err: VoltageMonitorError = UARTError::WriteError.into();
        assert_eq!(err, VoltageMonitorError::UARTError(UARTError::WriteError));
    }
}
