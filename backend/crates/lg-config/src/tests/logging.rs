use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir, write_config};

use googletest::assert_that;
use googletest::prelude::{anything, err, ok};
use serial_test::serial;

// =========================================================================
// Validation Tests - Logging
// =========================================================================

#[test]
#[serial]
fn given_log_file_with_separator_when_validate_then_error() {
    let _temp = setup_config_dir();
    let _file = EnvGuard::set("LG_LOG_FILE", "../escape.log");

    assert_that!(Config::load().unwrap().validate(), err(anything()));
}

#[test]
#[serial]
fn given_absolute_log_dir_when_validate_then_error() {
    let (temp, _guard) = setup_config_dir();
    write_config(&temp, "[logging]\ndir = \"/var/log\"");

    assert_that!(Config::load().unwrap().validate(), err(anything()));
}

#[test]
#[serial]
fn given_empty_log_file_env_when_load_then_stdout() {
    let _temp = setup_config_dir();
    let _file = EnvGuard::set("LG_LOG_FILE", "");

    let config = Config::load().unwrap();

    assert!(config.logging.file.is_none());
    assert_that!(config.validate(), ok(anything()));
}
