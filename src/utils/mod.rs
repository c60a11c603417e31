pub mod voltage_monitor_error;
