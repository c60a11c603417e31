//! Samples the voltage dividers on GPIO2 (A2) and GPIO3 (A3), smooths the readings and
//! sends one line per second on UART1 (TX: GPIO18, RX: GPIO19) at 9600 baud, for example:
//! `A2:12.034521 A3:4.998301`

#[cfg(target_os = "espidf")]
use voltage_monitor::{voltage_monitor_error::VoltageMonitorError, Microcontroller, Monitor, MonitorConfig};

#[cfg(target_os = "espidf")]
fn main() {
    esp_idf_svc::log::EspLogger::initialize_default();

    let mut micro = Microcontroller::take();
    let config = MonitorConfig::default();

    if let Err(err) = run(&mut micro, &config) {
        log::error!("Voltage monitor stopped: {err:?}");
    }
}

#[cfg(target_os = "espidf")]
fn run(micro: &mut Microcontroller, config: &MonitorConfig) -> Result<(), VoltageMonitorError> {
    let first = micro.set_pin_as_analog_in_pull_down(config.analog_pins[0])?;
    let second = micro.set_pin_as_analog_in_pull_down(config.analog_pins[1])?;
    let uart = micro.set_pins_for_uart(config.tx_pin, config.rx_pin, config.uart_num, config.baudrate)?;
    log::info!(
        "Reporting GPIO{} and GPIO{} on UART{} at {} baud",
        first.pin_num(),
        second.pin_num(),
        config.uart_num,
        config.baudrate
    );

    let mut monitor = Monitor::start(config, [first, second], uart)?;
    monitor.run(None, |ms| micro.sleep(ms))
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("voltage-monitor runs on the ESP32-C6, build it for riscv32imac-esp-espidf");
}
