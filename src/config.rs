use crate::{
    sensing::{AdcScale, VoltageDivider, ALPHA},
    serial::DEFAULT_REPORT_FORMAT,
};

/// Baud rate the report stream is sent at
pub const DEFAULT_BAUDRATE: u32 = 9600;

/// Time between two reports
pub const REPORT_PERIOD_MS: u32 = 1000;

/// GPIOs of the ESP32-C6 wired to the A2 and A3 divider outputs
pub const ANALOG_PINS: [usize; 2] = [2, 3];

/// UART1 routed to GPIO18/GPIO19. GPIO16/GPIO17 are the UART0 console pins on the C6
/// and stay with the ESP-IDF logger.
pub const REPORT_UART: usize = 1;
pub const REPORT_TX_PIN: usize = 18;
pub const REPORT_RX_PIN: usize = 19;

/// TX and RX of UART0, where the ESP-IDF console and the log output live
pub const CONSOLE_PINS: [usize; 2] = [16, 17];

/// Everything the monitor can be tuned with. There is no runtime configuration source,
/// the firmware is built with `MonitorConfig::default()`.
/// - `analog_pins`: GPIO numbers of the first and second channel
/// - `uart_num`, `tx_pin`, `rx_pin`, `baudrate`: Serial link the reports are written to
/// - `scale`: Reference voltage and resolution of the ADC
/// - `divider`: Resistor pair in front of both channels
/// - `alpha`: Smoothing factor of the low pass filter
/// - `period_ms`: Delay between two reports
/// - `report_format`: printf style template with two float fields
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    pub analog_pins: [usize; 2],
    pub uart_num: usize,
    pub tx_pin: usize,
    pub rx_pin: usize,
    pub baudrate: u32,
    pub scale: AdcScale,
    pub divider: VoltageDivider,
    pub alpha: f32,
    pub period_ms: u32,
    pub report_format: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            analog_pins: ANALOG_PINS,
            uart_num: REPORT_UART,
            tx_pin: REPORT_TX_PIN,
            rx_pin: REPORT_RX_PIN,
            baudrate: DEFAULT_BAUDRATE,
            scale: AdcScale::default(),
            divider: VoltageDivider::default(),
            alpha: ALPHA,
            period_ms: REPORT_PERIOD_MS,
            report_format: String::from(DEFAULT_REPORT_FORMAT),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test0_defaults_match_the_board() {
        let config = MonitorConfig::default();
        assert_eq!(config.baudrate, 9600);
        assert_eq!(config.period_ms, 1000);
        assert_eq!(config.alpha, 0.5);
        assert_eq!(config.divider.ratio(), 11.0);
        assert_eq!(config.scale, AdcScale::new(3.3, 4095.0));
        assert_eq!(config.report_format, "A2:%f A3:%f\n");
    }

    #[test]
    fn test1_report_link_stays_off_the_console_and_analog_pins() {
        let config = MonitorConfig::default();
        assert_eq!(config.uart_num, 1);
        assert_eq!((config.tx_pin, config.rx_pin), (18, 19));
        assert_ne!(config.tx_pin, config.rx_pin);
        for pin in [config.tx_pin, config.rx_pin] {
            assert!(!CONSOLE_PINS.contains(&pin));
            assert!(!config.analog_pins.contains(&pin));
        }
    }
}
