use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, err};
use serial_test::serial;

// =========================================================================
// Validation Tests - Store
// =========================================================================

#[test]
#[serial]
fn given_blank_collection_when_validate_then_error() {
    let _temp = setup_config_dir();
    let _collection = EnvGuard::set("LG_STORE_COLLECTION", "  ");

    assert_that!(Config::load().unwrap().validate(), err(anything()));
}

#[test]
#[serial]
fn given_zero_channel_capacity_when_validate_then_error() {
    let _temp = setup_config_dir();
    let _capacity = EnvGuard::set("LG_STORE_CHANNEL_CAPACITY", "0");

    assert_that!(Config::load().unwrap().validate(), err(anything()));
}

#[test]
#[serial]
fn given_channel_capacity_above_max_when_validate_then_error() {
    let _temp = setup_config_dir();
    let _capacity = EnvGuard::set("LG_STORE_CHANNEL_CAPACITY", "10001");

    assert_that!(Config::load().unwrap().validate(), err(anything()));
}
