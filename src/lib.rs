#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod device;
pub mod interface;
pub mod registers;
pub mod sensors;

// Re-export main types
pub use device::{MagData, Qmc5883lDriver};
pub use interface::I2cInterface;
pub use sensors::{
    Axis, FieldRange, MagConfig, MagDataUT, OverSampleRatio, StatusFlags, UpdateRate,
    DEFAULT_TEMPERATURE_COEFFICIENT,
};

/// QMC5883L I2C address (fixed: 0x0D)
///
/// The QMC5883L has no address pins; every device responds at 0x0D.
/// [`I2cInterface::new`] rejects any other address before a single bus
/// transaction is issued.
pub const I2C_ADDRESS: u8 = 0x0D;

/// Expected value of the chip ID register
pub const CHIP_ID_VALUE: u8 = 0xFF;

/// Driver errors
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Unsupported I2C address supplied at construction (contains the address)
    InvalidAddress(u8),
    /// Invalid chip ID register value (contains the actual value read)
    InvalidDevice(u8),
    /// Configuration selector outside its valid range
    InvalidConfig,
    /// Conversion cycle time requested before any update rate was applied
    NotConfigured,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
