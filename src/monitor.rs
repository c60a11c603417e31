use crate::{
    config::MonitorConfig,
    sensing::{calibrate, AdcCalibration, AdcScale, AnalogSource, LowPassFilter},
    serial::{ReportTemplate, SerialSink},
    utils::voltage_monitor_error::{AnalogInError, VoltageMonitorError},
};

/// One analog input together with the filtered voltage it feeds
struct VoltageChannel<A> {
    source: A,
    filter: LowPassFilter,
}

/// Samples two analog inputs, converts and smooths their voltages and reports them over
/// a serial output. The filtered voltages are owned here and only change in `step`.
/// - `channels`: The two inputs, in report order
/// - `sink`: Where report lines are written
/// - `scale`: Code to voltage scale of the ADC
/// - `ratio`: Divider compensation applied to both channels
/// - `template`: Format of each report line
/// - `period_ms`: Delay between two steps when running
pub struct Monitor<A, S> {
    channels: [VoltageChannel<A>; 2],
    sink: S,
    scale: AdcScale,
    ratio: f32,
    template: ReportTemplate,
    period_ms: u32,
}

impl<A: AnalogSource + AdcCalibration> VoltageChannel<A> {
    /// Calibrates the source and seeds the filter with one unfiltered reading
    fn start(mut source: A, scale: &AdcScale, ratio: f32, alpha: f32) -> Result<Self, AnalogInError> {
        calibrate(&mut source)?;
        let baseline = scale.to_voltage(source.read_raw()?, ratio);
        Ok(VoltageChannel {
            source,
            filter: LowPassFilter::new(alpha, baseline),
        })
    }
}

impl<A, S> Monitor<A, S>
where
    A: AnalogSource + AdcCalibration,
    S: SerialSink,
{
    /// Calibrates both inputs and takes the baseline reading of each one.
    ///
    /// # Arguments
    ///
    /// - `config`: Conversion, filtering and reporting settings
    /// - `sources`: The two analog inputs, in report order
    /// - `sink`: The serial output reports are written to
    ///
    /// # Returns
    ///
    /// A `Result` containing the started `Monitor`, or a `VoltageMonitorError` if it fails.
    ///
    /// # Errors
    ///
    /// - `VoltageMonitorError::ReportError`: If the configured report format is not usable
    /// - `VoltageMonitorError::AnalogInError`: If an input cannot be calibrated or read
    pub fn start(config: &MonitorConfig, sources: [A; 2], sink: S) -> Result<Self, VoltageMonitorError> {
        let template = ReportTemplate::parse(&config.report_format)?;
        let ratio = config.divider.ratio();
        let [first, second] = sources;
        let channels = [
            VoltageChannel::start(first, &config.scale, ratio, config.alpha)?,
            VoltageChannel::start(second, &config.scale, ratio, config.alpha)?,
        ];
        log::info!(
            "Monitor started, baseline {:.3} V and {:.3} V",
            channels[0].filter.value(),
            channels[1].filter.value()
        );
        Ok(Monitor {
            channels,
            sink,
            scale: config.scale,
            ratio,
            template,
            period_ms: config.period_ms,
        })
    }

    /// Samples both inputs, filters the new voltages and writes one report line.
    ///
    /// # Returns
    ///
    /// A `Result` with the two filtered voltages, or a `VoltageMonitorError` if reading or
    /// writing failed. A failed read leaves both filters untouched.
    pub fn step(&mut self) -> Result<[f32; 2], VoltageMonitorError> {
        let raw = [self.channels[0].source.read_raw()?, self.channels[1].source.read_raw()?];
        let mut filtered = [0.0; 2];
        for ((channel, code), value) in self.channels.iter_mut().zip(raw).zip(filtered.iter_mut()) {
            let voltage = self.scale.to_voltage(code, self.ratio);
            *value = channel.filter.update(voltage);
            log::debug!("raw {code} -> {voltage:.3} V, filtered {value:.3} V");
        }
        let line = self.template.render(filtered[0], filtered[1]);
        self.sink.write_all(line.as_bytes())?;
        Ok(filtered)
    }

    /// Repeats `step` followed by a delay of `period_ms`.
    ///
    /// # Arguments
    ///
    /// - `iterations`: Amount of steps to run, `None` to run until an error occurs
    /// - `sleep`: Blocks for the given amount of milliseconds
    ///
    /// # Errors
    ///
    /// The first error returned by `step`
    pub fn run<F: FnMut(u32)>(&mut self, iterations: Option<u32>, mut sleep: F) -> Result<(), VoltageMonitorError> {
        let mut done: u32 = 0;
        while iterations.map_or(true, |limit| done < limit) {
            self.step()?;
            sleep(self.period_ms);
            done = done.saturating_add(1);
        }
        Ok(())
    }

    /// Current filtered voltages, in report order
    pub fn filtered(&self) -> [f32; 2] {
        [self.channels[0].filter.value(), self.channels[1].filter.value()]
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
