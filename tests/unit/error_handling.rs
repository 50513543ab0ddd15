//! Unit tests for error propagation and state consistency

use crate::common::mock_interface::{MockError, MockInterface};
use crate::common::{create_mock_driver, default_mag_config};
use qmc5883l::{Error, I2cInterface};

#[test]
fn test_bus_read_failure_propagates() {
    let (mut driver, interface) = create_mock_driver();

    interface.fail_next_read();
    let result = driver.status();
    assert_eq!(result, Err(Error::Bus(MockError::Communication)));

    // The failure is not sticky
    assert!(driver.status().is_ok());
}

#[test]
fn test_bus_write_failure_propagates() {
    let (mut driver, interface) = create_mock_driver();

    interface.fail_next_write();
    let result = driver.start_measurement(default_mag_config());
    assert_eq!(result, Err(Error::Bus(MockError::Communication)));
}

#[test]
fn test_failed_configure_leaves_cached_rate_unchanged() {
    let (mut driver, interface) = create_mock_driver();

    interface.fail_next_write();
    let _ = driver.start_measurement(default_mag_config());

    // The write never reached the device, so the driver must still
    // consider itself unconfigured
    assert_eq!(driver.conversion_cycle_ms(), Err(Error::NotConfigured));
}

#[test]
fn test_identity_mismatch() {
    let (mut driver, interface) = create_mock_driver();

    interface.set_chip_id(0x42);
    assert_eq!(driver.verify_identity(), Err(Error::InvalidDevice(0x42)));
}

#[test]
fn test_read_failure_during_sequence_is_an_error_not_none() {
    let (mut driver, interface) = create_mock_driver();

    driver.start_measurement(default_mag_config()).unwrap();
    interface.fail_next_read();

    // A transport failure must surface, unlike plain "not ready"
    assert_eq!(
        driver.next_measurement(),
        Err(Error::Bus(MockError::Communication))
    );
}

#[test]
fn test_wrong_i2c_address_rejected_before_bus_access() {
    let interface = MockInterface::new();

    // The mock stands in for an I2C peripheral here; construction must
    // fail purely on the address value
    let result: Result<I2cInterface<MockInterface>, Error<MockError>> =
        I2cInterface::new(interface.clone(), 0x1E);
    assert_eq!(result.err(), Some(Error::InvalidAddress(0x1E)));
    assert!(interface.operations().is_empty());
}

#[test]
fn test_fixed_i2c_address_accepted() {
    let interface = MockInterface::new();

    let result: Result<I2cInterface<MockInterface>, Error<MockError>> =
        I2cInterface::new(interface, 0x0D);
    assert_eq!(result.map(|i| i.address()).ok(), Some(0x0D));
}
