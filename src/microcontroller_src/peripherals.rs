use std::mem;
use esp_idf_svc::hal::gpio::*;

use crate::utils::voltage_monitor_error::PeripheralError;

const PIN_COUNT: usize = 24;
const DIGITAL_PINS_BOUNDS: (usize, usize) = (0,23);
const ANALOG_PINS_BOUNDS: (usize, usize) = (0, 6);
const UART_COUNT: usize = 2;
const UART_BOUNDS: (usize, usize) = (0, 1);

/// Represents the esp32 Peripheral allowing to instanciate diferent Peripheral Types
#[derive(Default, Debug, PartialEq, Eq)]
pub enum Peripheral{
    Pin(u8),
    Adc,
    Uart(u8),
    #[default]
    None
}

impl Peripheral {
    fn take(&mut self) -> Peripheral {
        mem::take(self)
    }

    /// If the Peripheral is a Pin returns the corresponding AnyIoPin.
    /// If not it returns PeripheralError::NotAPin
    pub fn into_any_io_pin(self) -> Result<AnyIOPin, PeripheralError> {
        let pin = match self {
            Peripheral::Pin(pin_num) => match pin_num{
                0 => unsafe {Gpio0::new().downgrade()},
                1 => unsafe {Gpio1::new().downgrade()},
                2 => unsafe {Gpio2::new().downgrade()},
                3 => unsafe {Gpio3::new().downgrade()},
                4 => unsafe {Gpio4::new().downgrade()},
                5 => unsafe {Gpio5::new().downgrade()},
                6 => unsafe {Gpio6::new().downgrade()},
                7 => unsafe {Gpio7::new().downgrade()},
                8 => unsafe {Gpio8::new().downgrade()},
                9 => unsafe {Gpio9::new().downgrade()},
                10 => unsafe {Gpio10::new().downgrade()},
                11 => unsafe {Gpio11::new().downgrade()},
                12 => unsafe {Gpio12::new().downgrade()},
                13 => unsafe {Gpio13::new().downgrade()},
                15 => unsafe {Gpio15::new().downgrade()},
                16 => unsafe {Gpio16::new().downgrade()},
                17 => unsafe {Gpio17::new().downgrade()},
                18 => unsafe {Gpio18::new().downgrade()},
                19 => unsafe {Gpio19::new().downgrade()},
                20 => unsafe {Gpio20::new().downgrade()},
                21 => unsafe {Gpio21::new().downgrade()},
                22 => unsafe {Gpio22::new().downgrade()},
                23 => unsafe {Gpio23::new().downgrade()},
                _ => return Err(PeripheralError::NotAPin)
            },
            Peripheral::None => return Err(PeripheralError::AlreadyTaken),
            _ => return Err(PeripheralError::NotAPin),
        };
        Ok(pin)
    }
}

/// Represents the peripherals of the esp32C6 used by the monitor and provides a way to get each
/// one. Subsequent gets of the same peripheral will return Peripheral::None.
/// GPIO14 is not bonded out on the C6 and is never handed out.
pub struct Peripherals {
    pins: [Peripheral;PIN_COUNT],
    adc: Peripheral,
    uart: [Peripheral; UART_COUNT],
}

impl Peripherals {
    pub fn new() -> Peripherals {
        let pins: [Peripheral; PIN_COUNT] = std::array::from_fn(|pin_num| match pin_num {
            14 => Peripheral::None,
            _ => Peripheral::Pin(pin_num as u8),
        });
        let uart: [Peripheral; UART_COUNT] = [Peripheral::Uart(0), Peripheral::Uart(1)];
        Peripherals {
            pins,
            adc: Peripheral::Adc,
            uart,
        }
    }

    pub fn get_digital_pin(&mut self, pin_num: usize) -> Peripheral {
        self.get_pin_on_bound(pin_num, DIGITAL_PINS_BOUNDS)
    }

    pub fn get_analog_pin(&mut self, pin_num: usize) -> Peripheral {
        self.get_pin_on_bound(pin_num, ANALOG_PINS_BOUNDS)
    }

    fn get_pin_on_bound(&mut self, pin_num: usize, bound: (usize,usize)) -> Peripheral {
        if pin_num >= bound.0 && pin_num <= bound.1 {
            return self.pins[pin_num].take()
        }
        Peripheral::None
    }

    pub fn get_adc(&mut self) -> Peripheral {
        self.adc.take()
    }

    pub fn get_uart(&mut self, uart_num: usize) -> Peripheral {
        if uart_num >= UART_BOUNDS.0 && uart_num <= UART_BOUNDS.1 {
            return self.uart[uart_num].take()
        }
        Peripheral::None
    }
}
