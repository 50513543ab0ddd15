//! Magnetometer types and configuration
//!
//! Provides the configuration enums, control-byte packing, status flags,
//! and converted-data types for the QMC5883L's 3-axis magnetometer and
//! its integrated temperature sensor.

/// Default temperature scale coefficient in °C per LSB
///
/// The temperature sensor gain is factory-calibrated but its offset is
/// not, so absolute readings need a caller-supplied correction. Pass this
/// value to `read_temperature` when relative readings are enough.
pub const DEFAULT_TEMPERATURE_COEFFICIENT: f32 = 0.02;

/// Output data rate in continuous measurement mode
///
/// For most compassing applications the datasheet recommends 10 Hz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateRate {
    /// 10 Hz
    Hz10 = 0,
    /// 50 Hz
    Hz50 = 1,
    /// 100 Hz
    Hz100 = 2,
    /// 200 Hz
    Hz200 = 3,
}

impl UpdateRate {
    /// Decode a raw 2-bit rate selector
    ///
    /// Returns `None` for values outside 0..=3.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Hz10),
            1 => Some(Self::Hz50),
            2 => Some(Self::Hz100),
            3 => Some(Self::Hz200),
            _ => None,
        }
    }

    /// Get the output data rate in Hz
    #[must_use]
    pub const fn frequency_hz(self) -> u16 {
        match self {
            Self::Hz10 => 10,
            Self::Hz50 => 50,
            Self::Hz100 => 100,
            Self::Hz200 => 200,
        }
    }

    /// Worst-case conversion cycle time in milliseconds at this rate
    ///
    /// This is a caller-side wait hint for polling loops, not a hardware
    /// timeout: sleep this long between configuring the device and
    /// expecting the data-ready flag.
    #[must_use]
    pub const fn conversion_cycle_ms(self) -> u32 {
        match self {
            Self::Hz10 => 100,
            Self::Hz50 => 20,
            Self::Hz100 => 7,
            Self::Hz200 => 5,
        }
    }
}

/// Over sample ratio
///
/// A larger ratio means a smaller filter bandwidth, less in-band noise
/// and higher power consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverSampleRatio {
    /// 512 samples
    Osr512 = 0,
    /// 256 samples
    Osr256 = 1,
    /// 128 samples
    Osr128 = 2,
    /// 64 samples
    Osr64 = 3,
}

impl OverSampleRatio {
    /// Decode a raw 2-bit over-sample selector
    ///
    /// Returns `None` for values outside 0..=3.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Osr512),
            1 => Some(Self::Osr256),
            2 => Some(Self::Osr128),
            3 => Some(Self::Osr64),
            _ => None,
        }
    }

    /// Number of internal samples averaged per output value
    #[must_use]
    pub const fn samples(self) -> u16 {
        match self {
            Self::Osr512 => 512,
            Self::Osr256 => 256,
            Self::Osr128 => 128,
            Self::Osr64 => 64,
        }
    }
}

/// Full-scale magnetic field range
///
/// The narrower range gives finer resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldRange {
    /// ±2 Gauss
    Gauss2,
    /// ±8 Gauss
    Gauss8,
}

impl FieldRange {
    /// Get the sensitivity in LSB/Gauss
    ///
    /// This is used to convert raw sensor values to physical units.
    #[must_use]
    pub const fn lsb_per_gauss(self) -> f32 {
        match self {
            Self::Gauss2 => 12000.0,
            Self::Gauss8 => 3000.0,
        }
    }

    /// Get the maximum measurable field in Gauss
    #[must_use]
    pub const fn max_gauss(self) -> u8 {
        match self {
            Self::Gauss2 => 2,
            Self::Gauss8 => 8,
        }
    }

    const fn to_bit(self) -> bool {
        matches!(self, Self::Gauss8)
    }

    const fn from_bit(bit: bool) -> Self {
        if bit {
            Self::Gauss8
        } else {
            Self::Gauss2
        }
    }
}

/// Magnetometer configuration
///
/// Encodes to the CONTROL_1 register. `start_measurement` always writes
/// the whole register from this struct; nothing is merged with previous
/// device state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagConfig {
    /// Continuous measurement mode (standby when false)
    pub continuous: bool,
    /// Output data rate
    pub update_rate: UpdateRate,
    /// Full-scale field range
    pub field_range: FieldRange,
    /// Over sample ratio
    pub oversample: OverSampleRatio,
}

impl Default for MagConfig {
    /// Datasheet-recommended compassing setup: continuous 10 Hz, ±2 Gauss,
    /// OSR 512.
    fn default() -> Self {
        Self {
            continuous: true,
            update_rate: UpdateRate::Hz10,
            field_range: FieldRange::Gauss2,
            oversample: OverSampleRatio::Osr512,
        }
    }
}

impl MagConfig {
    /// Pack this configuration into the CONTROL_1 register byte
    ///
    /// Layout: `(osr << 6) | (rng << 4) | (odr << 2) | mode`. This exact
    /// packing is the wire contract with the device.
    #[must_use]
    pub const fn control_byte(self) -> u8 {
        ((self.oversample as u8) << 6)
            | ((self.field_range.to_bit() as u8) << 4)
            | ((self.update_rate as u8) << 2)
            | self.continuous as u8
    }

    /// Decode a CONTROL_1 register byte back into a configuration
    ///
    /// Total over all byte values: every 2-bit selector maps onto a valid
    /// variant and reserved bits are ignored.
    #[must_use]
    pub const fn from_control_byte(byte: u8) -> Self {
        // from_bits cannot fail on a masked 2-bit value
        let update_rate = match UpdateRate::from_bits((byte >> 2) & 0b11) {
            Some(rate) => rate,
            None => UpdateRate::Hz10,
        };
        let oversample = match OverSampleRatio::from_bits((byte >> 6) & 0b11) {
            Some(osr) => osr,
            None => OverSampleRatio::Osr512,
        };
        Self {
            continuous: byte & 0x01 != 0,
            update_rate,
            field_range: FieldRange::from_bit(byte & 0x10 != 0),
            oversample,
        }
    }

    /// Build a configuration from raw selector values
    ///
    /// Validates `update_rate` and `oversample` against 0..=3; returns
    /// `None` when either is out of range, so an invalid selector can
    /// never reach the device.
    #[must_use]
    pub const fn from_raw(
        continuous: bool,
        update_rate: u8,
        full_scale: bool,
        oversample: u8,
    ) -> Option<Self> {
        let update_rate = match UpdateRate::from_bits(update_rate) {
            Some(rate) => rate,
            None => return None,
        };
        let oversample = match OverSampleRatio::from_bits(oversample) {
            Some(osr) => osr,
            None => return None,
        };
        Some(Self {
            continuous,
            update_rate,
            field_range: FieldRange::from_bit(full_scale),
            oversample,
        })
    }
}

/// Status register flags
///
/// Ephemeral: decoded fresh from the device on every poll, never cached
/// by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusFlags {
    /// A new measurement is available to read
    pub data_ready: bool,
    /// One or more axes exceeded the selected field range
    pub overflow: bool,
    /// A measurement was dropped before it was read
    pub data_skipped: bool,
}

/// Measurement axis selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// X axis
    X = 0,
    /// Y axis
    Y = 1,
    /// Z axis
    Z = 2,
}

impl Axis {
    /// Decode a raw axis index (0=X, 1=Y, 2=Z)
    ///
    /// Returns `None` for values outside 0..=2.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::X),
            1 => Some(Self::Y),
            2 => Some(Self::Z),
            _ => None,
        }
    }

    /// Address of this axis's data register (low byte of the int16 word)
    #[must_use]
    pub const fn data_register(self) -> u8 {
        crate::registers::REG_DATA_XOUT_L + 2 * self as u8
    }
}

/// Magnetometer data in microteslas (µT)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagDataUT {
    /// X-axis magnetic field in µT
    pub x: f32,
    /// Y-axis magnetic field in µT
    pub y: f32,
    /// Z-axis magnetic field in µT
    pub z: f32,
}

impl MagDataUT {
    /// Calculate the magnitude of the magnetic field vector
    ///
    /// Returns the magnitude in µT.
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }

    /// Normalize the magnetic field vector to unit length
    ///
    /// If the magnitude is near zero, returns (0, 0, 0).
    #[must_use]
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag < 1e-6 {
            Self {
                x: 0.0,
                y: 0.0,
                z: 0.0,
            }
        } else {
            Self {
                x: self.x / mag,
                y: self.y / mag,
                z: self.z / mag,
            }
        }
    }
}
