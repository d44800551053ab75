#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn projconf_cmd() -> assert_cmd::Command {
	let mut cmd = assert_cmd::Command::cargo_bin("projconf").unwrap();
	for var in [
		"PLATFORMIO_BUILD_FLAGS",
		"PLATFORMIO_SRC_BUILD_FLAGS",
		"PLATFORMIO_SRC_FILTER",
		"PLATFORMIO_UPLOAD_PORT",
		"PLATFORMIO_UPLOAD_FLAGS",
		"PLATFORMIO_LIB_EXTRA_DIRS",
		"PLATFORMIO_EXTRA_SCRIPTS",
	] {
		cmd.env_remove(var);
	}
	cmd
}

fn write_project(dir: &Path, content: &str) {
	fs::write(dir.join("platformio.ini"), content).unwrap();
}

const PROJECT: &str = r#"
[platformio]
env_default = uno

[env]
framework = arduino
build_flags = -DCOMMON

[env:uno]
platform = atmelavr
board = uno

[env:nano]
platform = atmelavr
board = nanoatmega328
upload_port = ${sysenv.PROJCONF_IT_PORT}
"#;

// ============================================================================
// CLI flag tests
// ============================================================================

#[test]
fn test_help_flag() {
	projconf_cmd()
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains("Resolve build-project configuration"));
}

#[test]
fn test_version_flag() {
	projconf_cmd()
		.arg("--version")
		.assert()
		.success()
		.stdout(predicate::str::contains("projconf"));
}

#[test]
fn test_no_args_shows_help() {
	projconf_cmd()
		.assert()
		.failure()
		.stderr(predicate::str::contains("Usage"));
}

// ============================================================================
// envs / show / get / json
// ============================================================================

#[test]
fn test_envs_marks_default() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_project(temp_dir.path(), PROJECT);

	projconf_cmd()
		.arg("envs")
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("uno (default)"))
		.stdout(predicate::str::contains("nano\n"));
}

#[test]
fn test_show_environment_includes_inherited_options() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_project(temp_dir.path(), PROJECT);

	projconf_cmd()
		.args(["show", "-e", "uno"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("[env:uno]"))
		.stdout(predicate::str::contains("board = uno"))
		.stdout(predicate::str::contains("framework = arduino"))
		.stdout(predicate::str::contains("build_flags = -DCOMMON"));
}

#[test]
fn test_show_unknown_environment_fails() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_project(temp_dir.path(), PROJECT);

	projconf_cmd()
		.args(["show", "-e", "due"])
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("env:due"));
}

#[test]
fn test_get_resolves_sysenv_reference() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_project(temp_dir.path(), PROJECT);

	projconf_cmd()
		.args(["get", "env:nano", "upload_port"])
		.env("PROJCONF_IT_PORT", "/dev/ttyACM0")
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout("/dev/ttyACM0\n");
}

#[test]
fn test_get_multi_value_extended_by_environment() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_project(temp_dir.path(), PROJECT);

	projconf_cmd()
		.args(["get", "env:uno", "build_flags"])
		.env("PLATFORMIO_BUILD_FLAGS", "-DFROM_ENV")
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout("-DCOMMON\n-DFROM_ENV\n");
}

#[test]
fn test_get_missing_option_fails() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_project(temp_dir.path(), PROJECT);

	projconf_cmd()
		.args(["get", "env:uno", "lib_deps"])
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("not found"));
}

#[test]
fn test_json_output() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_project(temp_dir.path(), PROJECT);

	let output = projconf_cmd()
		.arg("json")
		.current_dir(temp_dir.path())
		.output()
		.unwrap();
	assert!(output.status.success());

	let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
	assert_eq!(json["env:uno"]["board"], "uno");
	assert_eq!(json["env:uno"]["build_flags"], serde_json::json!(["-DCOMMON"]));
	assert_eq!(json["platformio"]["env_default"], serde_json::json!(["uno"]));
}

#[test]
fn test_custom_project_conf_path() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = temp_dir.path().join("custom.ini");
	fs::write(&path, "[env:due]\nboard = due\n").unwrap();

	projconf_cmd()
		.args(["-c", path.to_str().unwrap(), "envs"])
		.assert()
		.success()
		.stdout(predicate::str::contains("due"));
}

// ============================================================================
// validate
// ============================================================================

#[test]
fn test_validate_valid_project() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_project(temp_dir.path(), PROJECT);

	projconf_cmd()
		.args(["validate", "-e", "nano"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("valid"));
}

#[test]
fn test_validate_unknown_environment() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_project(temp_dir.path(), PROJECT);

	projconf_cmd()
		.args(["validate", "-e", "missing"])
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("missing"))
		.stderr(predicate::str::contains("uno, nano"));
}

#[test]
fn test_validate_no_project_file() {
	let temp_dir = tempfile::tempdir().unwrap();

	projconf_cmd()
		.arg("validate")
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("not found"));
}

#[test]
fn test_validate_invalid_syntax() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_project(temp_dir.path(), "board = uno\n[[[");

	projconf_cmd()
		.arg("validate")
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("Invalid project configuration"));
}

#[test]
fn test_validate_prints_warnings() {
	let temp_dir = tempfile::tempdir().unwrap();
	write_project(
		temp_dir.path(),
		"[env:uno]\nboard = uno\nlib_use = Foo\nmystery = 1\n",
	);

	projconf_cmd()
		.arg("validate")
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stderr(predicate::str::contains("Warning! `lib_use` option"))
		.stderr(predicate::str::contains(
			"Warning! Ignore unknown option `mystery` in section `[env:uno]`",
		));
}
