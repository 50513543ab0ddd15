//! Register definitions for the QMC5883L
//!
//! The QMC5883L has a flat 8-bit register space. All multi-byte values
//! (axis data at 0x00..=0x05 and temperature at 0x07..=0x08) are signed
//! 16-bit little-endian words; those are read as raw bursts by the driver
//! rather than modeled here, so a whole measurement comes from a single
//! bus transaction.
//!
//! ## Register map
//! - `0x00..=0x05`: X, Y, Z axis data (int16 LE each)
//! - `0x06`: status
//! - `0x07..=0x08`: temperature (int16 LE)
//! - `0x09`: control 1 (mode / rate / range / over sample)
//! - `0x0A`: control 2 (soft reset / pointer rollover / interrupt pin)
//! - `0x0B`: SET/RESET period
//! - `0x0D`: chip ID (reads 0xFF)

device_driver::create_device!(
    device_name: Qmc5883l,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = LE;
        }

        /// STATUS - Measurement status (0x06)
        ///
        /// All three flags are cleared by reading the data registers.
        register Status {
            const ADDRESS = 0x06;
            const SIZE_BITS = 8;

            /// Data ready: a new measurement is available
            drdy: bool = 0,
            /// Overflow: one or more axes exceeded the selected range
            ovl: bool = 1,
            /// Data skipped: a measurement was dropped before being read
            dor: bool = 2,
            reserved_7_3: uint = 3..8,
        },

        /// CONTROL_1 - Measurement configuration (0x09)
        ///
        /// The bit packing of this register is the wire-compatibility
        /// surface of the driver: `(osr << 6) | (rng << 4) | (odr << 2) | mode`.
        register Control1 {
            const ADDRESS = 0x09;
            const SIZE_BITS = 8;

            /// Operating mode: continuous measurement when set, standby when clear
            mode: bool = 0,
            reserved_1: uint = 1..2,
            /// Output data rate (0=10Hz, 1=50Hz, 2=100Hz, 3=200Hz)
            odr: uint = 2..4,
            /// Full-scale field range: ±8 Gauss when set, ±2 Gauss when clear
            rng: bool = 4,
            reserved_5: uint = 5..6,
            /// Over sample ratio (0=512, 1=256, 2=128, 3=64)
            osr: uint = 6..8,
        },

        /// CONTROL_2 - Reset and bus behavior (0x0A)
        register Control2 {
            const ADDRESS = 0x0A;
            const SIZE_BITS = 8;

            /// Interrupt pin disable ("1" disables the INT pin)
            int_enb: bool = 0,
            reserved_5_1: uint = 1..6,
            /// Pointer rollover: data-register reads wrap 0x00..=0x05
            rol_pnt: bool = 6,
            /// Soft reset: restore power-on register defaults
            soft_rst: bool = 7,
        },

        /// SET/RESET period (0x0B)
        ///
        /// The datasheet recommends writing 0x01.
        register SetResetPeriod {
            const ADDRESS = 0x0B;
            const SIZE_BITS = 8;

            /// SET/RESET period FBR value
            period: uint = 0..8,
        },

        /// Chip ID (0x0D)
        ///
        /// Reads 0xFF on the QMC5883L.
        register ChipId {
            const ADDRESS = 0x0D;
            const SIZE_BITS = 8;

            /// Device ID (should read 0xFF)
            chip_id: uint = 0..8,
        }
    }
);

// Re-export for the driver
pub use Qmc5883l as RegisterDevice;

/// Base address of the axis data block (X, Y, Z: 6 bytes, int16 LE each)
pub const REG_DATA_XOUT_L: u8 = 0x00;

/// Base address of the temperature data block (2 bytes, int16 LE)
pub const REG_TEMP_OUT_L: u8 = 0x07;
