//! High-level driver API for the QMC5883L
//!
//! This module provides the user-facing interface to the QMC5883L,
//! handling configuration, status polling, and measurement reading.
//!
//! ## Cached state vs. device truth
//!
//! The driver caches exactly one piece of configuration: the update rate
//! most recently written by `start_measurement`, because the conversion
//! cycle time depends on it and the device offers no cheaper way to get
//! it back. Everything else is read fresh from the device on each call:
//! `is_continuous_mode`, `is_standby`, `status`, and `is_data_ready`
//! always reflect the hardware, even if something else reconfigured it
//! behind the driver's back.

use crate::registers::{Qmc5883l as RegisterDevice, REG_DATA_XOUT_L, REG_TEMP_OUT_L};
use crate::sensors::{Axis, FieldRange, MagConfig, StatusFlags, UpdateRate};
use crate::{Error, CHIP_ID_VALUE};

// Only import RegisterInterface when not using async feature
#[cfg(not(feature = "async"))]
use device_driver::RegisterInterface;

/// Magnetometer data (raw 16-bit values)
///
/// Raw signed counts proportional to the magnetic field. Use
/// [`MagData::to_microteslas`] with the configured [`FieldRange`] to get
/// physical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagData {
    /// X-axis magnetic field (raw)
    pub x: i16,
    /// Y-axis magnetic field (raw)
    pub y: i16,
    /// Z-axis magnetic field (raw)
    pub z: i16,
}

impl MagData {
    /// Convert raw counts to microteslas for the given field range
    ///
    /// 1 Gauss = 100 µT.
    #[must_use]
    pub fn to_microteslas(self, range: FieldRange) -> crate::sensors::MagDataUT {
        let scale = 100.0 / range.lsb_per_gauss();
        crate::sensors::MagDataUT {
            x: f32::from(self.x) * scale,
            y: f32::from(self.y) * scale,
            z: f32::from(self.z) * scale,
        }
    }
}

/// Main driver for the QMC5883L
pub struct Qmc5883lDriver<I> {
    device: RegisterDevice<I>,
    /// Rate most recently applied via `start_measurement`; None until then
    update_rate: Option<UpdateRate>,
    // Scratch buffers reused across reads to avoid per-call allocation.
    // Exclusively owned by the driver, never handed out.
    buf_2: [u8; 2],
    buf_6: [u8; 6],
}

impl<I> Qmc5883lDriver<I> {
    /// Create a new QMC5883L driver instance
    ///
    /// Performs no bus access. Call [`init`](Self::init) before taking
    /// measurements.
    pub fn new(interface: I) -> Self {
        Self {
            device: RegisterDevice::new(interface),
            update_rate: None,
            buf_2: [0; 2],
            buf_6: [0; 6],
        }
    }

    /// Consume the driver and return the bus interface
    pub fn release(self) -> I {
        self.device.interface
    }
}

#[cfg(not(feature = "async"))]
impl<I> Qmc5883lDriver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Initialize the device with the recommended settings
    ///
    /// Disables the interrupt pin, leaves pointer rollover off, and writes
    /// the datasheet-recommended SET/RESET period (0x01). Must run once
    /// before any measurement; running it again is harmless.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn init(&mut self) -> Result<(), Error<I::Error>> {
        // INT_ENB "1" disables the interrupt pin; the driver is poll-only
        self.device.control_2().write(|w| {
            w.set_int_enb(true);
            w.set_rol_pnt(false);
            w.set_soft_rst(false);
        })?;
        self.device.set_reset_period().write(|w| {
            w.set_period(0x01);
        })?;
        Ok(())
    }

    /// Read the chip ID register
    ///
    /// Reads 0xFF on a QMC5883L. No side effects; usable as a liveness
    /// check at any time.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn chip_id(&mut self) -> Result<u8, Error<I::Error>> {
        let reg = self.device.chip_id().read()?;
        Ok(reg.chip_id())
    }

    /// Verify the chip ID register against the expected value (0xFF)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDevice`] with the actual value if the ID
    /// does not match, or a bus error if communication fails.
    pub fn verify_identity(&mut self) -> Result<(), Error<I::Error>> {
        let id = self.chip_id()?;
        if id != CHIP_ID_VALUE {
            return Err(Error::InvalidDevice(id));
        }
        Ok(())
    }

    /// Apply a measurement configuration
    ///
    /// Writes the whole CONTROL_1 register from `config` (no merge with
    /// prior device state) and caches the update rate for
    /// [`conversion_cycle_ms`](Self::conversion_cycle_ms). With
    /// `config.continuous` set this starts periodic measurements;
    /// with it clear the device enters standby.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. On
    /// failure the cached rate is left unchanged.
    pub fn start_measurement(&mut self, config: MagConfig) -> Result<(), Error<I::Error>> {
        self.device.control_1().write(|w| {
            w.set_mode(config.continuous);
            w.set_odr(config.update_rate as u8);
            w.set_rng(matches!(config.field_range, FieldRange::Gauss8));
            w.set_osr(config.oversample as u8);
        })?;
        self.update_rate = Some(config.update_rate);
        Ok(())
    }

    /// Apply a measurement configuration from raw selector values
    ///
    /// Validates `update_rate` and `oversample` against 0..=3 before
    /// touching the bus.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for an out-of-range selector
    /// (without any bus write), or a bus error if the write fails.
    pub fn start_measurement_raw(
        &mut self,
        continuous: bool,
        update_rate: u8,
        full_scale: bool,
        oversample: u8,
    ) -> Result<(), Error<I::Error>> {
        let config = MagConfig::from_raw(continuous, update_rate, full_scale, oversample)
            .ok_or(Error::InvalidConfig)?;
        self.start_measurement(config)
    }

    /// Check whether the device is in continuous measurement mode
    ///
    /// Re-reads CONTROL_1 from the device; never answered from cache.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_continuous_mode(&mut self) -> Result<bool, Error<I::Error>> {
        let reg = self.device.control_1().read()?;
        Ok(reg.mode())
    }

    /// Check whether the device is in standby (low-power) mode
    ///
    /// Re-reads CONTROL_1 from the device; never answered from cache.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_standby(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(!self.is_continuous_mode()?)
    }

    /// Read the status register
    ///
    /// Always a fresh read; the flags are never cached.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn status(&mut self) -> Result<StatusFlags, Error<I::Error>> {
        let reg = self.device.status().read()?;
        Ok(StatusFlags {
            data_ready: reg.drdy(),
            overflow: reg.ovl(),
            data_skipped: reg.dor(),
        })
    }

    /// Check the data-ready flag
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_data_ready(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.status()?.data_ready)
    }

    /// Perform a soft reset of the device
    ///
    /// Read-modify-write of CONTROL_2: sets the reset bit while
    /// preserving the other bits. The device returns to its power-on
    /// defaults; reconfigure with [`init`](Self::init) and
    /// [`start_measurement`](Self::start_measurement) afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn soft_reset(&mut self) -> Result<(), Error<I::Error>> {
        self.device.control_2().modify(|w| {
            w.set_soft_rst(true);
        })?;
        Ok(())
    }

    /// Read one axis as a raw signed 16-bit value
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_axis(&mut self, axis: Axis) -> Result<i16, Error<I::Error>> {
        self.device
            .interface
            .read_register(axis.data_register(), 16, &mut self.buf_2)?;
        Ok(i16::from_le_bytes(self.buf_2))
    }

    /// Read all three axes in one burst
    ///
    /// Reads the 6-byte data block at 0x00 in a single bus transaction,
    /// so all axes come from the same conversion. Prefer this over three
    /// [`read_axis`](Self::read_axis) calls.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_all(&mut self) -> Result<MagData, Error<I::Error>> {
        self.device
            .interface
            .read_register(REG_DATA_XOUT_L, 48, &mut self.buf_6)?;

        let x = i16::from_le_bytes([self.buf_6[0], self.buf_6[1]]);
        let y = i16::from_le_bytes([self.buf_6[2], self.buf_6[3]]);
        let z = i16::from_le_bytes([self.buf_6[4], self.buf_6[5]]);

        Ok(MagData { x, y, z })
    }

    /// Read the temperature sensor as a raw signed 16-bit value
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_temperature_raw(&mut self) -> Result<i16, Error<I::Error>> {
        self.device
            .interface
            .read_register(REG_TEMP_OUT_L, 16, &mut self.buf_2)?;
        Ok(i16::from_le_bytes(self.buf_2))
    }

    /// Read the temperature in °C
    ///
    /// `coefficient` is the scale in °C per LSB; see
    /// [`DEFAULT_TEMPERATURE_COEFFICIENT`](crate::DEFAULT_TEMPERATURE_COEFFICIENT).
    /// The sensor's offset is not factory-calibrated, so absolute values
    /// need caller-side correction.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_temperature(&mut self, coefficient: f32) -> Result<f32, Error<I::Error>> {
        let raw = self.read_temperature_raw()?;
        Ok(coefficient * f32::from(raw))
    }

    /// Conversion cycle time in milliseconds for the configured rate
    ///
    /// Looks up the rate cached by the last
    /// [`start_measurement`](Self::start_measurement). Callers should
    /// sleep this long between configuring the device and consuming
    /// results.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConfigured`] if no rate has ever been applied.
    pub fn conversion_cycle_ms(&self) -> Result<u32, Error<I::Error>> {
        self.update_rate
            .map(UpdateRate::conversion_cycle_ms)
            .ok_or(Error::NotConfigured)
    }

    /// Pull one measurement from the sequence
    ///
    /// Returns a decoded vector when the device is in continuous mode and
    /// reports data-ready, `Ok(None)` otherwise. "Not ready" is a normal
    /// outcome, not an error; the sequence never ends and each pull is
    /// evaluated independently. The mode check re-reads the device rather
    /// than trusting driver state, so an external reconfiguration to
    /// standby stops the sequence immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn next_measurement(&mut self) -> Result<Option<MagData>, Error<I::Error>> {
        if !self.is_continuous_mode()? {
            return Ok(None);
        }
        if !self.is_data_ready()? {
            return Ok(None);
        }
        self.read_all().map(Some)
    }
}

#[cfg(feature = "async")]
impl<I> Qmc5883lDriver<I>
where
    I: device_driver::AsyncRegisterInterface<AddressType = u8>,
{
    /// Initialize the device with the recommended settings
    ///
    /// Disables the interrupt pin, leaves pointer rollover off, and writes
    /// the datasheet-recommended SET/RESET period (0x01). Must run once
    /// before any measurement; running it again is harmless.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn init(&mut self) -> Result<(), Error<I::Error>> {
        self.device
            .control_2()
            .write_async(|w| {
                w.set_int_enb(true);
                w.set_rol_pnt(false);
                w.set_soft_rst(false);
            })
            .await?;
        self.device
            .set_reset_period()
            .write_async(|w| {
                w.set_period(0x01);
            })
            .await?;
        Ok(())
    }

    /// Read the chip ID register
    ///
    /// Reads 0xFF on a QMC5883L. No side effects; usable as a liveness
    /// check at any time.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn chip_id(&mut self) -> Result<u8, Error<I::Error>> {
        let reg = self.device.chip_id().read_async().await?;
        Ok(reg.chip_id())
    }

    /// Verify the chip ID register against the expected value (0xFF)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDevice`] with the actual value if the ID
    /// does not match, or a bus error if communication fails.
    pub async fn verify_identity(&mut self) -> Result<(), Error<I::Error>> {
        let id = self.chip_id().await?;
        if id != CHIP_ID_VALUE {
            return Err(Error::InvalidDevice(id));
        }
        Ok(())
    }

    /// Apply a measurement configuration
    ///
    /// Writes the whole CONTROL_1 register from `config` (no merge with
    /// prior device state) and caches the update rate for
    /// [`conversion_cycle_ms`](Self::conversion_cycle_ms).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. On
    /// failure the cached rate is left unchanged.
    pub async fn start_measurement(&mut self, config: MagConfig) -> Result<(), Error<I::Error>> {
        self.device
            .control_1()
            .write_async(|w| {
                w.set_mode(config.continuous);
                w.set_odr(config.update_rate as u8);
                w.set_rng(matches!(config.field_range, FieldRange::Gauss8));
                w.set_osr(config.oversample as u8);
            })
            .await?;
        self.update_rate = Some(config.update_rate);
        Ok(())
    }

    /// Apply a measurement configuration from raw selector values
    ///
    /// Validates `update_rate` and `oversample` against 0..=3 before
    /// touching the bus.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for an out-of-range selector
    /// (without any bus write), or a bus error if the write fails.
    pub async fn start_measurement_raw(
        &mut self,
        continuous: bool,
        update_rate: u8,
        full_scale: bool,
        oversample: u8,
    ) -> Result<(), Error<I::Error>> {
        let config = MagConfig::from_raw(continuous, update_rate, full_scale, oversample)
            .ok_or(Error::InvalidConfig)?;
        self.start_measurement(config).await
    }

    /// Check whether the device is in continuous measurement mode
    ///
    /// Re-reads CONTROL_1 from the device; never answered from cache.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn is_continuous_mode(&mut self) -> Result<bool, Error<I::Error>> {
        let reg = self.device.control_1().read_async().await?;
        Ok(reg.mode())
    }

    /// Check whether the device is in standby (low-power) mode
    ///
    /// Re-reads CONTROL_1 from the device; never answered from cache.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn is_standby(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(!self.is_continuous_mode().await?)
    }

    /// Read the status register
    ///
    /// Always a fresh read; the flags are never cached.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn status(&mut self) -> Result<StatusFlags, Error<I::Error>> {
        let reg = self.device.status().read_async().await?;
        Ok(StatusFlags {
            data_ready: reg.drdy(),
            overflow: reg.ovl(),
            data_skipped: reg.dor(),
        })
    }

    /// Check the data-ready flag
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn is_data_ready(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.status().await?.data_ready)
    }

    /// Perform a soft reset of the device
    ///
    /// Read-modify-write of CONTROL_2: sets the reset bit while
    /// preserving the other bits.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn soft_reset(&mut self) -> Result<(), Error<I::Error>> {
        self.device
            .control_2()
            .modify_async(|w| {
                w.set_soft_rst(true);
            })
            .await?;
        Ok(())
    }

    /// Read one axis as a raw signed 16-bit value
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_axis(&mut self, axis: Axis) -> Result<i16, Error<I::Error>> {
        self.device
            .interface
            .read_register(axis.data_register(), 16, &mut self.buf_2)
            .await?;
        Ok(i16::from_le_bytes(self.buf_2))
    }

    /// Read all three axes in one burst
    ///
    /// Reads the 6-byte data block at 0x00 in a single bus transaction,
    /// so all axes come from the same conversion. Prefer this over three
    /// [`read_axis`](Self::read_axis) calls.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_all(&mut self) -> Result<MagData, Error<I::Error>> {
        self.device
            .interface
            .read_register(REG_DATA_XOUT_L, 48, &mut self.buf_6)
            .await?;

        let x = i16::from_le_bytes([self.buf_6[0], self.buf_6[1]]);
        let y = i16::from_le_bytes([self.buf_6[2], self.buf_6[3]]);
        let z = i16::from_le_bytes([self.buf_6[4], self.buf_6[5]]);

        Ok(MagData { x, y, z })
    }

    /// Read the temperature sensor as a raw signed 16-bit value
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_temperature_raw(&mut self) -> Result<i16, Error<I::Error>> {
        self.device
            .interface
            .read_register(REG_TEMP_OUT_L, 16, &mut self.buf_2)
            .await?;
        Ok(i16::from_le_bytes(self.buf_2))
    }

    /// Read the temperature in °C
    ///
    /// `coefficient` is the scale in °C per LSB; see
    /// [`DEFAULT_TEMPERATURE_COEFFICIENT`](crate::DEFAULT_TEMPERATURE_COEFFICIENT).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_temperature(&mut self, coefficient: f32) -> Result<f32, Error<I::Error>> {
        let raw = self.read_temperature_raw().await?;
        Ok(coefficient * f32::from(raw))
    }

    /// Conversion cycle time in milliseconds for the configured rate
    ///
    /// Looks up the rate cached by the last
    /// [`start_measurement`](Self::start_measurement).
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConfigured`] if no rate has ever been applied.
    pub fn conversion_cycle_ms(&self) -> Result<u32, Error<I::Error>> {
        self.update_rate
            .map(UpdateRate::conversion_cycle_ms)
            .ok_or(Error::NotConfigured)
    }

    /// Pull one measurement from the sequence
    ///
    /// Returns a decoded vector when the device is in continuous mode and
    /// reports data-ready, `Ok(None)` otherwise. "Not ready" is a normal
    /// outcome, not an error. The mode check re-reads the device rather
    /// than trusting driver state.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn next_measurement(&mut self) -> Result<Option<MagData>, Error<I::Error>> {
        if !self.is_continuous_mode().await? {
            return Ok(None);
        }
        if !self.is_data_ready().await? {
            return Ok(None);
        }
        self.read_all().await.map(Some)
    }
}
