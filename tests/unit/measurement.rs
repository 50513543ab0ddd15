//! Unit tests for measurement decoding

use crate::common::mock_interface::Operation;
use crate::common::{create_mock_driver, test_utils::assert_float_eq};
use qmc5883l::sensors::{Axis, FieldRange};

#[test]
fn test_little_endian_signed_decode() {
    let (mut driver, interface) = create_mock_driver();

    // X = 0x0001, Y = 0xFFFF, Z = 0x8000 as little-endian byte pairs
    interface.set_mag_data_bytes([0x01, 0x00, 0xFF, 0xFF, 0x00, 0x80]);

    let data = driver.read_all().unwrap();
    assert_eq!(data.x, 1);
    assert_eq!(data.y, -1);
    assert_eq!(data.z, -32768);
}

#[test]
fn test_read_all_uses_single_burst() {
    let (mut driver, interface) = create_mock_driver();

    interface.set_mag_data(100, -200, 300);
    interface.clear_operations();

    driver.read_all().unwrap();

    let ops = interface.operations();
    assert_eq!(
        ops,
        vec![Operation::ReadRegister {
            address: 0x00,
            len: 6
        }],
        "all three axes must come from one 6-byte transaction"
    );
}

#[test]
fn test_read_single_axes() {
    let (mut driver, interface) = create_mock_driver();

    interface.set_mag_data(1234, -5678, 31000);

    assert_eq!(driver.read_axis(Axis::X).unwrap(), 1234);
    assert_eq!(driver.read_axis(Axis::Y).unwrap(), -5678);
    assert_eq!(driver.read_axis(Axis::Z).unwrap(), 31000);
}

#[test]
fn test_read_axis_targets_axis_register() {
    let (mut driver, interface) = create_mock_driver();

    interface.set_mag_data(0, 0, 0);
    interface.clear_operations();

    driver.read_axis(Axis::Z).unwrap();

    assert_eq!(
        interface.operations(),
        vec![Operation::ReadRegister {
            address: 0x04,
            len: 2
        }]
    );
}

#[test]
fn test_extreme_values_survive_decode() {
    let (mut driver, interface) = create_mock_driver();

    interface.set_mag_data(i16::MAX, i16::MIN, 0);

    let data = driver.read_all().unwrap();
    assert_eq!(data.x, i16::MAX);
    assert_eq!(data.y, i16::MIN);
    assert_eq!(data.z, 0);
}

#[test]
fn test_raw_to_microtesla_conversion() {
    let (mut driver, interface) = create_mock_driver();

    // 12000 LSB = 1 Gauss = 100 µT on the ±2 G range
    interface.set_mag_data(12000, -12000, 6000);

    let ut = driver
        .read_all()
        .unwrap()
        .to_microteslas(FieldRange::Gauss2);
    assert_float_eq(ut.x, 100.0, 0.001);
    assert_float_eq(ut.y, -100.0, 0.001);
    assert_float_eq(ut.z, 50.0, 0.001);

    // Same counts on the ±8 G range mean a 4x larger field
    interface.set_mag_data(3000, 0, 0);
    let ut = driver
        .read_all()
        .unwrap()
        .to_microteslas(FieldRange::Gauss8);
    assert_float_eq(ut.x, 100.0, 0.001);
}
