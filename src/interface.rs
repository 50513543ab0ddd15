//! Bus interface implementation for the QMC5883L
//!
//! This module provides an implementation of the `device-driver` register
//! interface traits for I2C communication with the QMC5883L. The device is
//! I2C-only and answers at the fixed address 0x0D.

use crate::{Error, I2C_ADDRESS};
use device_driver::RegisterInterface;

/// I2C interface for the QMC5883L
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface at the device's fixed address (0x0D)
    ///
    /// # Arguments
    /// * `i2c` - The I2C peripheral
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::default(i2c);
    /// let mut mag = Qmc5883lDriver::new(interface);
    /// ```
    pub const fn default(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS,
        }
    }

    /// Create a new I2C interface with an explicit device address
    ///
    /// The QMC5883L has no address pins, so the only accepted value is
    /// [`I2C_ADDRESS`] (0x0D). Any other address is rejected here, before
    /// any bus traffic happens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddress`] if `address` is not 0x0D.
    pub fn new<E>(i2c: I2C, address: u8) -> Result<Self, Error<E>> {
        if address != I2C_ADDRESS {
            return Err(Error::InvalidAddress(address));
        }
        Ok(Self { i2c, address })
    }

    /// The device address this interface talks to
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        self.i2c.write_read(self.address, &[address], read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        // Create a buffer with register address + data. The largest burst
        // this driver ever writes is a single byte.
        let mut buffer = [0u8; 8];
        buffer[0] = address;
        let len = write_data.len().min(7);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.i2c.write(self.address, &buffer[..=len])
    }
}

#[cfg(feature = "async")]
impl<I2C, E> device_driver::AsyncRegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal_async::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    async fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        self.i2c
            .write_read(self.address, &[address], read_data)
            .await
    }

    async fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        let mut buffer = [0u8; 8];
        buffer[0] = address;
        let len = write_data.len().min(7);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.i2c.write(self.address, &buffer[..=len]).await
    }
}
