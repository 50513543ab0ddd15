//! Unit tests for the pull-based measurement sequence

use crate::common::{create_mock_driver, default_mag_config};

#[test]
fn test_pull_yields_nothing_when_not_ready() {
    let (mut driver, interface) = create_mock_driver();

    driver.start_measurement(default_mag_config()).unwrap();
    interface.set_status(0x00);

    assert_eq!(driver.next_measurement().unwrap(), None);
}

#[test]
fn test_pull_yields_vector_when_ready_and_continuous() {
    let (mut driver, interface) = create_mock_driver();

    driver.start_measurement(default_mag_config()).unwrap();
    interface.set_status(0x01);
    interface.set_mag_data(10, -20, 30);

    let data = driver.next_measurement().unwrap().unwrap();
    assert_eq!((data.x, data.y, data.z), (10, -20, 30));
}

#[test]
fn test_pull_yields_nothing_in_standby_even_when_ready() {
    let (mut driver, interface) = create_mock_driver();

    let mut config = default_mag_config();
    config.continuous = false;
    driver.start_measurement(config).unwrap();

    interface.set_status(0x01);
    interface.set_mag_data(1, 2, 3);

    assert_eq!(driver.next_measurement().unwrap(), None);
}

#[test]
fn test_pull_respects_external_reconfiguration() {
    let (mut driver, interface) = create_mock_driver();

    driver.start_measurement(default_mag_config()).unwrap();
    interface.set_status(0x01);
    interface.set_mag_data(1, 2, 3);
    assert!(driver.next_measurement().unwrap().is_some());

    // Something else drops the device into standby; the sequence must
    // notice because the mode check re-reads the device
    interface.set_register(0x09, 0x00);
    assert_eq!(driver.next_measurement().unwrap(), None);
}

#[test]
fn test_alternating_readiness_over_31_pulls() {
    let (mut driver, interface) = create_mock_driver();

    driver.start_measurement(default_mag_config()).unwrap();
    interface.set_mag_data(100, 200, 300);

    // One status read per pull: ready, not ready, ready, ...
    interface.set_status_sequence(vec![0x01, 0x00]);

    let mut yielded = 0;
    for pull in 0..31 {
        let result = driver.next_measurement().unwrap();
        if pull % 2 == 0 {
            assert!(result.is_some(), "pull {} polled a ready device", pull);
            yielded += 1;
        } else {
            assert!(result.is_none(), "pull {} polled a busy device", pull);
        }
    }

    // 16 of the 31 polls saw the data-ready flag
    assert_eq!(yielded, 16);
}

#[test]
fn test_each_pull_is_independent() {
    let (mut driver, interface) = create_mock_driver();

    driver.start_measurement(default_mag_config()).unwrap();

    interface.set_status(0x00);
    assert_eq!(driver.next_measurement().unwrap(), None);
    assert_eq!(driver.next_measurement().unwrap(), None);

    // The sequence never ends: readiness returning later still yields
    interface.set_status(0x01);
    interface.set_mag_data(7, 8, 9);
    assert!(driver.next_measurement().unwrap().is_some());
}
