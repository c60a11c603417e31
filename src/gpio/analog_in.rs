use crate::{
    microcontroller_src::{microcontroller::SharableAdcDriver, peripherals::Peripheral},
    sensing::{AdcCalibration, AdcScale, AnalogSource},
    utils::voltage_monitor_error::{AnalogInError, PeripheralError},
};
use esp_idf_svc::{
    hal::{adc::attenuation::adc_atten_t, adc::*, gpio::*},
    sys::{esp, gpio_pull_mode_t_GPIO_PULLDOWN_ONLY, gpio_set_pull_mode},
};
use oneshot::{config::AdcChannelConfig, AdcChannelDriver};

/// Driver for receiving analog inputs from a particular pin
/// - `adc_channel_driver`: Instance of AnalogChannels
/// - `pin_num`: Number of the GPIO the channel reads
/// - `scale`: Code space calibrated millivolts are mapped back into
/// - `calibrated`: Whether reads go through the channel's factory calibration curve
pub struct AnalogIn<'a> {
    adc_channel_driver: AnalogChannels<'a>,
    pin_num: u8,
    scale: AdcScale,
    calibrated: bool,
}

/// Enums the possible channels from the ADC. In the ESP32-C6 the
/// ADC has 7 channels, each on a different GPIO going from
/// GPIO-0 to GPIO-6 inclusive
enum AnalogChannels<'a> {
    Channel0(AdcChannelDriver<'a, Gpio0, SharableAdcDriver<'a>>),
    Channel1(AdcChannelDriver<'a, Gpio1, SharableAdcDriver<'a>>),
    Channel2(AdcChannelDriver<'a, Gpio2, SharableAdcDriver<'a>>),
    Channel3(AdcChannelDriver<'a, Gpio3, SharableAdcDriver<'a>>),
    Channel4(AdcChannelDriver<'a, Gpio4, SharableAdcDriver<'a>>),
    Channel5(AdcChannelDriver<'a, Gpio5, SharableAdcDriver<'a>>),
    Channel6(AdcChannelDriver<'a, Gpio6, SharableAdcDriver<'a>>),
}

impl<'a> AnalogIn<'a> {
    /// Create a new AnalogIn for a specific pin, with the pin pulled down while idle.
    /// The channel starts uncalibrated, see [AdcCalibration].
    ///
    /// # Arguments
    ///
    /// - `pin`: A Peripheral of type Pin
    /// - `adc_driver`: An instance of a SharableAdcDriver
    /// - `attenuation`: An adc_atten_t representing the desired attenuation
    ///
    /// # Returns
    ///
    /// A `Result` containing the new `AnalogIn` instance, or an `AnalogInError` if the
    /// initialization fails.
    ///
    /// # Errors
    ///
    /// - `AnalogInError::InvalidPin`: If the pin Peripheral is not an analog pin
    /// - `AnalogInError::InvalidPeripheral`: If the pin was already taken or is not a pin
    /// - `AnalogInError::ChannelCreationError`: If the channel could not be created
    /// - `AnalogInError::CannotSetPull`: If the pull down could not be set
    pub(crate) fn new(
        pin: Peripheral,
        adc_driver: SharableAdcDriver<'a>,
        attenuation: adc_atten_t,
    ) -> Result<Self, AnalogInError> {
        let pin_num = match pin {
            Peripheral::Pin(pin_num) => pin_num,
            Peripheral::None => return Err(PeripheralError::AlreadyTaken.into()),
            _ => return Err(PeripheralError::NotAPin.into()),
        };
        let adc_channel_driver = AnalogIn::new_channel(pin_num, adc_driver, attenuation)?;
        set_pull_down(pin_num)?;
        Ok(AnalogIn {
            adc_channel_driver,
            pin_num,
            scale: AdcScale::default(),
            calibrated: false,
        })
    }

    /// Creates a new analog channel driver for a given pin
    ///
    /// # Errors
    ///
    /// - `AnalogInError::InvalidPin`: If the pin is not one of GPIO0 to GPIO6
    /// - `AnalogInError::ChannelCreationError`: If the channel could not be created
    fn new_channel(
        pin_num: u8,
        sharable_adc_driver: SharableAdcDriver<'a>,
        attenuation: adc_atten_t,
    ) -> Result<AnalogChannels<'a>, AnalogInError> {
        let mut config = AdcChannelConfig::new();
        config.attenuation = attenuation;
        config.resolution = Resolution::Resolution12Bit;
        config.calibration = true;
        let adc_channel_driver: AnalogChannels<'a> = match pin_num {
            0 => AnalogChannels::Channel0(
                AdcChannelDriver::new(sharable_adc_driver, unsafe { Gpio0::new() }, &config)
                    .map_err(|_| AnalogInError::ChannelCreationError)?,
            ),
            1 => AnalogChannels::Channel1(
                AdcChannelDriver::new(sharable_adc_driver, unsafe { Gpio1::new() }, &config)
                    .map_err(|_| AnalogInError::ChannelCreationError)?,
            ),
            2 => AnalogChannels::Channel2(
                AdcChannelDriver::new(sharable_adc_driver, unsafe { Gpio2::new() }, &config)
                    .map_err(|_| AnalogInError::ChannelCreationError)?,
            ),
            3 => AnalogChannels::Channel3(
                AdcChannelDriver::new(sharable_adc_driver, unsafe { Gpio3::new() }, &config)
                    .map_err(|_| AnalogInError::ChannelCreationError)?,
            ),
            4 => AnalogChannels::Channel4(
                AdcChannelDriver::new(sharable_adc_driver, unsafe { Gpio4::new() }, &config)
                    .map_err(|_| AnalogInError::ChannelCreationError)?,
            ),
            5 => AnalogChannels::Channel5(
                AdcChannelDriver::new(sharable_adc_driver, unsafe { Gpio5::new() }, &config)
                    .map_err(|_| AnalogInError::ChannelCreationError)?,
            ),
            6 => AnalogChannels::Channel6(
                AdcChannelDriver::new(sharable_adc_driver, unsafe { Gpio6::new() }, &config)
                    .map_err(|_| AnalogInError::ChannelCreationError)?,
            ),
            _ => return Err(AnalogInError::InvalidPin),
        };
        Ok(adc_channel_driver)
    }

    /// Returns the uncalibrated code read from the analog pin, in the range [0, 4095].
    ///
    /// # Errors
    ///
    /// - `AnalogInError::ErrorReading`: If the read operation failed
    pub fn read_raw(&mut self) -> Result<u16, AnalogInError> {
        match self.adc_channel_driver {
            AnalogChannels::Channel0(ref mut channel_driver) => channel_driver.read_raw(),
            AnalogChannels::Channel1(ref mut channel_driver) => channel_driver.read_raw(),
            AnalogChannels::Channel2(ref mut channel_driver) => channel_driver.read_raw(),
            AnalogChannels::Channel3(ref mut channel_driver) => channel_driver.read_raw(),
            AnalogChannels::Channel4(ref mut channel_driver) => channel_driver.read_raw(),
            AnalogChannels::Channel5(ref mut channel_driver) => channel_driver.read_raw(),
            AnalogChannels::Channel6(ref mut channel_driver) => channel_driver.read_raw(),
        }
        .map_err(|_| AnalogInError::ErrorReading)
    }

    /// Returns the pin voltage in millivolts, corrected with the factory calibration
    /// curve burnt into the chip's eFuses.
    ///
    /// # Errors
    ///
    /// - `AnalogInError::ErrorReading`: If the read operation failed
    pub fn read_millivolts(&mut self) -> Result<u16, AnalogInError> {
        match self.adc_channel_driver {
            AnalogChannels::Channel0(ref mut channel_driver) => channel_driver.read(),
            AnalogChannels::Channel1(ref mut channel_driver) => channel_driver.read(),
            AnalogChannels::Channel2(ref mut channel_driver) => channel_driver.read(),
            AnalogChannels::Channel3(ref mut channel_driver) => channel_driver.read(),
            AnalogChannels::Channel4(ref mut channel_driver) => channel_driver.read(),
            AnalogChannels::Channel5(ref mut channel_driver) => channel_driver.read(),
            AnalogChannels::Channel6(ref mut channel_driver) => channel_driver.read(),
        }
        .map_err(|_| AnalogInError::ErrorReading)
    }

    pub fn pin_num(&self) -> u8 {
        self.pin_num
    }
}

/// Pulls the pin down so a floating input reads as zero
fn set_pull_down(pin_num: u8) -> Result<(), AnalogInError> {
    esp!(unsafe { gpio_set_pull_mode(pin_num as i32, gpio_pull_mode_t_GPIO_PULLDOWN_ONLY) })
        .map_err(|_| AnalogInError::CannotSetPull)
}

/// Once calibrated, codes come from the calibrated millivolts mapped back through `scale`,
/// so the monitor converts both kinds of reading the same way.
impl AnalogSource for AnalogIn<'_> {
    fn read_raw(&mut self) -> Result<u16, AnalogInError> {
        if !self.calibrated {
            return AnalogIn::read_raw(self);
        }
        let millivolts = self.read_millivolts()?;
        Ok(self.scale.code_from_millivolts(millivolts))
    }
}

/// The C6 has no self calibration to trigger. Its factory curve is applied by the channel's
/// calibration handle, so a request checks that a calibrated conversion succeeds and switches
/// later reads over to it.
impl AdcCalibration for AnalogIn<'_> {
    fn request_calibration(&mut self) -> Result<(), AnalogInError> {
        self.calibrated = false;
        self.read_millivolts().map_err(|_| AnalogInError::CalibrationError)?;
        self.calibrated = true;
        Ok(())
    }

    fn calibration_in_progress(&self) -> bool {
        !self.calibrated
    }
}
