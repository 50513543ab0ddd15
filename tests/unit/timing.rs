//! Unit tests for conversion cycle timing

use crate::common::{create_mock_driver, default_mag_config};
use qmc5883l::sensors::UpdateRate;
use qmc5883l::Error;

#[test]
fn test_cycle_time_before_configuration_fails() {
    let (driver, _interface) = create_mock_driver();

    assert_eq!(driver.conversion_cycle_ms(), Err(Error::NotConfigured));
}

#[test]
fn test_cycle_time_follows_configured_rate() {
    let (mut driver, _interface) = create_mock_driver();

    let mut config = default_mag_config();
    config.update_rate = UpdateRate::Hz100;
    driver.start_measurement(config).unwrap();

    assert_eq!(driver.conversion_cycle_ms(), Ok(7));
}

#[test]
fn test_cycle_time_tracks_reconfiguration() {
    let (mut driver, _interface) = create_mock_driver();
    let mut config = default_mag_config();

    let expected = [
        (UpdateRate::Hz10, 100),
        (UpdateRate::Hz50, 20),
        (UpdateRate::Hz100, 7),
        (UpdateRate::Hz200, 5),
    ];

    for (rate, ms) in expected {
        config.update_rate = rate;
        driver.start_measurement(config).unwrap();
        assert_eq!(driver.conversion_cycle_ms(), Ok(ms));
    }
}

#[test]
fn test_standby_configuration_still_caches_rate() {
    let (mut driver, _interface) = create_mock_driver();

    let mut config = default_mag_config();
    config.continuous = false;
    config.update_rate = UpdateRate::Hz200;
    driver.start_measurement(config).unwrap();

    // The cycle time reflects whatever rate was last written, even if the
    // device is sitting in standby
    assert_eq!(driver.conversion_cycle_ms(), Ok(5));
}
