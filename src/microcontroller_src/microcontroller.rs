use attenuation::adc_atten_t;
use esp_idf_svc::hal::{adc::*, delay::FreeRtos};
use oneshot::AdcDriver;
use std::rc::Rc;

use crate::{
    gpio::AnalogIn,
    microcontroller_src::peripherals::{Peripheral, Peripherals},
    serial::UART,
    utils::voltage_monitor_error::{AdcDriverError, AnalogInError, UARTError},
};

pub type SharableAdcDriver<'a> = Rc<AdcDriver<'a, ADC1>>;

/// Primary abstraction for interacting with the microcontroller, providing access to the
/// peripherals the monitor needs.
///
/// - `peripherals`: An instance of `Peripherals`, handing out each pin, the ADC and the UARTs once.
/// - `adc_driver`: An optional shared instance of `SharableAdcDriver`, started with the first analog input.
pub struct Microcontroller<'a> {
    peripherals: Peripherals,
    adc_driver: Option<SharableAdcDriver<'a>>,
}

impl<'a> Microcontroller<'a> {
    /// Creates a new Microcontroller instance. Should only be called once.
    ///
    /// # Returns
    ///
    /// The new Microcontroller
    pub fn take() -> Self {
        esp_idf_svc::sys::link_patches();
        Microcontroller {
            peripherals: Peripherals::new(),
            adc_driver: None,
        }
    }

    /// Starts an adc driver if no other was started before. Bitwidth is always set to 12, since
    /// the ESP32-C6 only allows that width
    ///
    /// # Errors
    ///
    /// - `AdcDriverError::AlreadyTaken`: If the ADC peripheral was handed out before
    /// - Any other `AdcDriverError` the driver reports when starting
    fn start_adc_driver(&mut self) -> Result<SharableAdcDriver<'a>, AdcDriverError> {
        if let Some(driver) = &self.adc_driver {
            return Ok(driver.clone());
        }
        if self.peripherals.get_adc() != Peripheral::Adc {
            return Err(AdcDriverError::AlreadyTaken);
        }
        let driver = Rc::new(AdcDriver::new(unsafe { ADC1::new() })?);
        self.adc_driver.replace(driver.clone());
        Ok(driver)
    }

    fn set_pin_as_analog_in(&mut self, pin_num: usize, attenuation: adc_atten_t) -> Result<AnalogIn<'a>, AnalogInError> {
        let adc_driver = self.start_adc_driver()?;
        let pin_peripheral = self.peripherals.get_analog_pin(pin_num);
        AnalogIn::new(pin_peripheral, adc_driver, attenuation)
    }

    /// Sets pin as analog input pulled down while idle, with attenuation set to 11dB so
    /// the whole [0, 3.3] V range of the divider output can be read.
    ///
    /// # Arguments
    ///
    /// - `pin_num`: The number of the pin on the microcontroller to configure as an analog input.
    ///
    /// # Returns
    ///
    /// A `Result` with an `AnalogIn` instance that reads raw codes from the specified pin, or an
    /// `AnalogInError` if the pin cannot be used as analog input.
    pub fn set_pin_as_analog_in_pull_down(&mut self, pin_num: usize) -> Result<AnalogIn<'a>, AnalogInError> {
        self.set_pin_as_analog_in(pin_num, attenuation::DB_11)
    }

    /// Configures the specified pins for a UART with 8 data bits, no parity and one stop bit.
    ///
    /// # Arguments
    ///
    /// - `tx_pin`: The pin number to be used for UART transmission (TX).
    /// - `rx_pin`: The pin number to be used for UART reception (RX).
    /// - `uart_num`: The UART number to be configured.
    /// - `baudrate`: The baud rate for the UART communication.
    ///
    /// # Returns
    ///
    /// A `Result` with the configured `UART`, or an `UARTError` if the pins or the UART are not available.
    pub fn set_pins_for_uart(&mut self, tx_pin: usize, rx_pin: usize, uart_num: usize, baudrate: u32) -> Result<UART<'a>, UARTError> {
        let tx_peripheral = self.peripherals.get_digital_pin(tx_pin);
        let rx_peripheral = self.peripherals.get_digital_pin(rx_pin);
        let uart_peripheral = self.peripherals.get_uart(uart_num);
        UART::new(tx_peripheral, rx_peripheral, uart_peripheral, baudrate)
    }

    /// Blocks the current task for the given amount of milliseconds
    pub fn sleep(&self, miliseconds: u32) {
        FreeRtos::delay_ms(miliseconds)
    }
}
