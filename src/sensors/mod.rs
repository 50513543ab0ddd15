//! Sensor types and configuration
//!
//! This module contains the configuration enums, status flags, and
//! converted-data types for the QMC5883L magnetometer.

pub mod magnetometer;

pub use magnetometer::{
    Axis, FieldRange, MagConfig, MagDataUT, OverSampleRatio, StatusFlags, UpdateRate,
    DEFAULT_TEMPERATURE_COEFFICIENT,
};
