mod utils;
#[cfg(target_os = "espidf")]
mod microcontroller_src;

pub mod config;
#[cfg(target_os = "espidf")]
pub mod gpio;
pub mod monitor;
pub mod sensing;
pub mod serial;

#[cfg(target_os = "espidf")]
pub use microcontroller_src::Microcontroller;
pub use config::MonitorConfig;
pub use monitor::Monitor;
pub use utils::voltage_monitor_error;
