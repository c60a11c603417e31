use esp_idf_svc::hal::{
    gpio::AnyIOPin,
    uart::{config, UartDriver, UART0, UART1},
    units::Hertz,
};

use crate::{
    microcontroller_src::peripherals::Peripheral,
    serial::SerialSink,
    utils::voltage_monitor_error::{PeripheralError, UARTError},
};

/// Driver for the transmitting side of a UART
pub struct UART<'a> {
    driver: UartDriver<'a>,
}

impl<'a> UART<'a> {
    /// Creates a new UART on the given pins with 8 data bits, no parity and one stop bit.
    ///
    /// # Arguments
    ///
    /// - `tx`: A Peripheral of type Pin, used for transmission
    /// - `rx`: A Peripheral of type Pin, used for reception
    /// - `uart_peripheral`: A Peripheral of type Uart
    /// - `baudrate`: The baud rate of the link
    ///
    /// # Returns
    ///
    /// A `Result` containing the new `UART` instance, or an `UARTError` if the
    /// initialization fails.
    ///
    /// # Errors
    ///
    /// - `UARTError::InvalidPin`: If a pin Peripheral is not valid
    /// - `UARTError::InvalidUartNumber`: If the uart Peripheral is not valid
    /// - `UARTError::InvalidPeripheral`: If the uart Peripheral was already taken
    pub(crate) fn new(tx: Peripheral, rx: Peripheral, uart_peripheral: Peripheral, baudrate: u32) -> Result<UART<'a>, UARTError> {
        let tx_pin = tx.into_any_io_pin().map_err(|_| UARTError::InvalidPin)?;
        let rx_pin = rx.into_any_io_pin().map_err(|_| UARTError::InvalidPin)?;
        let config = config::Config::new().baudrate(Hertz(baudrate));

        let driver = match uart_peripheral {
            Peripheral::Uart(0) => UartDriver::new(
                unsafe { UART0::new() },
                tx_pin,
                rx_pin,
                Option::<AnyIOPin>::None,
                Option::<AnyIOPin>::None,
                &config,
            ),
            Peripheral::Uart(1) => UartDriver::new(
                unsafe { UART1::new() },
                tx_pin,
                rx_pin,
                Option::<AnyIOPin>::None,
                Option::<AnyIOPin>::None,
                &config,
            ),
            Peripheral::None => return Err(PeripheralError::AlreadyTaken.into()),
            _ => return Err(UARTError::InvalidUartNumber),
        }
        .map_err(|_| UARTError::InvalidUartNumber)?;

        Ok(UART { driver })
    }

    pub fn write(&mut self, bytes_to_write: &[u8]) -> Result<usize, UARTError> {
        self.driver.write(bytes_to_write).map_err(|_| UARTError::WriteError)
    }
}

impl SerialSink for UART<'_> {
    fn write(&mut self, bytes: &[u8]) -> Result<usize, UARTError> {
        UART::write(self, bytes)
    }
}
