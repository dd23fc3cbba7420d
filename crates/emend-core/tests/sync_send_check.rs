//! Test that the engine's public types are Sync + Send

use emend_core::{EditCommand, FixBundle, FixError, FixReport, Fixer, Representation};

fn assert_sync_send<T: Sync + Send>() {}

#[test]
fn test_command_is_sync_send() {
    assert_sync_send::<EditCommand<String>>();
    assert_sync_send::<EditCommand<Vec<u8>>>();
}

#[test]
fn test_bundle_is_sync_send() {
    assert_sync_send::<FixBundle<String>>();
    assert_sync_send::<FixBundle<Vec<u8>>>();
}

#[test]
fn test_fixer_and_subject_are_sync_send() {
    assert_sync_send::<Fixer<String>>();
    assert_sync_send::<Representation>();
    assert_sync_send::<FixReport>();
    assert_sync_send::<FixError>();
}
