//! Behaviour-driven tests for profile loading.

use std::cell::RefCell;

use camino::Utf8PathBuf;
use nexuscli::config::{PROFILE_FILE_NAME, ProfileConfig, load_profile};
use nexuscli::dirs::FixedBaseDirs;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

struct Home {
    _temp: tempfile::TempDir,
    path: Utf8PathBuf,
}

#[fixture]
fn home() -> Home {
    let temp = tempfile::tempdir().expect("temp dir");
    let path = Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("UTF-8 path");
    Home { _temp: temp, path }
}

#[fixture]
fn load_result() -> RefCell<Option<Result<ProfileConfig, String>>> {
    RefCell::new(None)
}

fn write_profile(home: &Home, contents: &str) {
    std::fs::write(home.path.join(PROFILE_FILE_NAME), contents).expect("write profile");
}

#[given("a home directory without a profile")]
fn no_profile(home: &Home) {
    assert!(!home.path.join(PROFILE_FILE_NAME).exists());
}

#[given("a home directory whose profile sets the host URL to {url}")]
fn profile_with_host(home: &Home, url: String) {
    write_profile(
        home,
        &format!("host_url = \"{}\"\n", url.trim_matches('"')),
    );
}

#[given("a home directory whose profile contains an unknown key")]
fn profile_with_unknown_key(home: &Home) {
    write_profile(home, "host = \"http://localhost:8081\"\n");
}

#[when("the default profile is loaded")]
fn load_default(home: &Home, load_result: &RefCell<Option<Result<ProfileConfig, String>>>) {
    let dirs = FixedBaseDirs::new(home.path.clone());
    let outcome = load_profile(None, &dirs).map_err(|e| e.to_string());
    load_result.borrow_mut().replace(outcome);
}

#[when("the profile {name} is loaded explicitly")]
fn load_explicit(
    home: &Home,
    load_result: &RefCell<Option<Result<ProfileConfig, String>>>,
    name: String,
) {
    let path = home.path.join(name.trim_matches('"'));
    let dirs = FixedBaseDirs::new(home.path.clone());
    let outcome = load_profile(Some(&path), &dirs).map_err(|e| e.to_string());
    load_result.borrow_mut().replace(outcome);
}

fn loaded(load_result: &RefCell<Option<Result<ProfileConfig, String>>>) -> ProfileConfig {
    match load_result.borrow().as_ref() {
        Some(Ok(profile)) => profile.clone(),
        Some(Err(error)) => panic!("expected profile loading to succeed: {error}"),
        None => panic!("profile should be loaded"),
    }
}

#[then("the profile has no host URL")]
fn assert_no_host(load_result: &RefCell<Option<Result<ProfileConfig, String>>>) {
    assert!(loaded(load_result).host_url.is_none());
}

#[then("the profile host URL is {expected}")]
fn assert_host(load_result: &RefCell<Option<Result<ProfileConfig, String>>>, expected: String) {
    assert_eq!(
        loaded(load_result).host_url.as_deref(),
        Some(expected.trim_matches('"'))
    );
}

#[then("a configuration error mentioning {snippet} is reported")]
fn assert_error(load_result: &RefCell<Option<Result<ProfileConfig, String>>>, snippet: String) {
    let snippet = snippet.trim_matches('"');
    match load_result.borrow().as_ref() {
        Some(Err(error)) => assert!(
            error.contains(snippet),
            "expected error '{error}' to mention '{snippet}'"
        ),
        Some(Ok(profile)) => panic!("expected profile loading to fail but got {profile:?}"),
        None => panic!("profile should be loaded"),
    }
}

#[scenario("tests/features/config_loading.feature", index = 0)]
fn scenario_missing_default(
    home: Home,
    load_result: RefCell<Option<Result<ProfileConfig, String>>>,
) {
    let _ = (home, load_result);
}

#[scenario("tests/features/config_loading.feature", index = 1)]
fn scenario_default_profile(
    home: Home,
    load_result: RefCell<Option<Result<ProfileConfig, String>>>,
) {
    let _ = (home, load_result);
}

#[scenario("tests/features/config_loading.feature", index = 2)]
fn scenario_explicit_missing(
    home: Home,
    load_result: RefCell<Option<Result<ProfileConfig, String>>>,
) {
    let _ = (home, load_result);
}

#[scenario("tests/features/config_loading.feature", index = 3)]
fn scenario_unknown_key(home: Home, load_result: RefCell<Option<Result<ProfileConfig, String>>>) {
    let _ = (home, load_result);
}
