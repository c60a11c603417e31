/// Reference voltage of the ADC, in volts
pub const VREF: f32 = 3.3;

/// Highest code a 12 bit conversion can produce
pub const ADC_LEVEL_RESOLUTION: f32 = 4095.0;

/// Resistor between the measured node and the ADC pin, in kOhm
pub const R1: f32 = 10.0;

/// Resistor between the ADC pin and ground, in kOhm
pub const R2: f32 = 1.0;

/// Linear scale between ADC codes and the voltage seen on the pin.
/// - `vref`: Voltage represented by the full scale code
/// - `full_scale`: Highest code the converter produces
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdcScale {
    pub vref: f32,
    pub full_scale: f32,
}

/// Resistor pair scaling the measured voltage down to the ADC range.
/// - `r1`: Upper resistor, between the measured node and the pin
/// - `r2`: Lower resistor, between the pin and ground
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoltageDivider {
    pub r1: f32,
    pub r2: f32,
}

impl AdcScale {
    pub fn new(vref: f32, full_scale: f32) -> Self {
        AdcScale { vref, full_scale }
    }

    /// Converts a raw code into volts, compensating for the given divider ratio.
    /// Codes above `full_scale` are not clamped.
    ///
    /// # Arguments
    ///
    /// - `raw`: The code read from the ADC
    /// - `ratio`: The divider compensation factor, 1.0 when the pin is measured directly
    ///
    /// # Returns
    ///
    /// An `f32` with the measured voltage
    pub fn to_voltage(&self, raw: u16, ratio: f32) -> f32 {
        raw as f32 * (self.vref / self.full_scale) * ratio
    }

    /// Maps a calibrated pin voltage in millivolts back into the code space of this scale,
    /// so calibrated and raw readings go through the same conversion.
    /// Voltages above `vref` give `full_scale`.
    pub fn code_from_millivolts(&self, millivolts: u16) -> u16 {
        let code = (millivolts as f32 * self.full_scale / (self.vref * 1000.0)).round();
        code.min(self.full_scale) as u16
    }

    /// Highest voltage that can be reported for the given divider ratio
    pub fn max_voltage(&self, ratio: f32) -> f32 {
        self.vref * ratio
    }
}

impl Default for AdcScale {
    fn default() -> Self {
        AdcScale::new(VREF, ADC_LEVEL_RESOLUTION)
    }
}

impl VoltageDivider {
    pub fn new(r1: f32, r2: f32) -> Self {
        VoltageDivider { r1, r2 }
    }

    /// Factor the pin voltage must be multiplied by to recover the measured voltage
    pub fn ratio(&self) -> f32 {
        (self.r1 + self.r2) / self.r2
    }
}

impl Default for VoltageDivider {
    fn default() -> Self {
        VoltageDivider::new(R1, R2)
    }
}

/// Converts a raw 12 bit code into volts with the default reference voltage.
pub fn adc_to_voltage(raw: u16, ratio: f32) -> f32 {
    AdcScale::default().to_voltage(raw, ratio)
}

#[cfg(test)]
mod test {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test0_zero_code_is_zero_volts() {
        assert_eq!(adc_to_voltage(0, VoltageDivider::default().ratio()), 0.0);
        assert_eq!(adc_to_voltage(0, 1.0), 0.0);
    }

    #[test]
    fn test1_full_scale_without_divider_is_vref() {
        assert!((adc_to_voltage(4095, 1.0) - VREF).abs() < EPSILON);
    }

    #[test]
    fn test2_default_divider_ratio_is_eleven() {
        assert_eq!(VoltageDivider::default().ratio(), 11.0);
        assert_eq!(VoltageDivider::new(3.0, 1.0).ratio(), 4.0);
    }

    #[test]
    fn test3_mid_scale_through_divider() {
        let voltage = adc_to_voltage(2048, 11.0);
        let expected = 3.3 * (2048.0 / 4095.0) * 11.0;
        assert!((voltage - expected).abs() < EPSILON);
        assert!((voltage - 18.154).abs() < 1e-3);
    }

    #[test]
    fn test4_conversion_is_linear_in_code_and_ratio() {
        let scale = AdcScale::default();
        for raw in [1u16, 100, 1000, 2047, 4000] {
            let single = scale.to_voltage(raw, 1.0);
            assert!((scale.to_voltage(raw * 2, 1.0) - 2.0 * single).abs() < EPSILON);
            assert!((scale.to_voltage(raw, 5.5) - 5.5 * single).abs() < EPSILON * 10.0);
        }
    }

    #[test]
    fn test5_calibrated_millivolts_map_back_to_codes() {
        let scale = AdcScale::default();
        assert_eq!(scale.code_from_millivolts(0), 0);
        assert_eq!(scale.code_from_millivolts(3300), 4095);
        assert_eq!(scale.code_from_millivolts(1650), 2048);
        assert_eq!(scale.code_from_millivolts(5000), 4095);

        let code = scale.code_from_millivolts(1234);
        assert!((scale.to_voltage(code, 1.0) - 1.234).abs() < 1e-3);
    }

    #[test]
    fn test6_custom_reference_and_range() {
        let scale = AdcScale::new(2.5, 4095.0);
        assert!((scale.to_voltage(4095, 2.0) - 5.0).abs() < EPSILON);
        assert_eq!(scale.max_voltage(11.0), 27.5);
    }
}
