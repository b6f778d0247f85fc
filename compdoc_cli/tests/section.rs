mod common;

use compdoc_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;
use similar_asserts::assert_eq;

use self::common::CHECKBOX_JSON;

const README: &str = "# UI kit\n\nComponents for forms.\n\n## API\n\nOutdated.\n\n## \
                      License\n\nMIT\n";

const MERGED: &str = "# UI kit\n\nComponents for forms.\n\n## API\n\n### checkbox\n\nA simple \
                      checkbox component\n\n#### props\n\n- `model` ***Array*** (*required*) \
                      `twoWay = true`\n\n## License\n\nMIT\n";

#[test]
fn section_requires_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("checkbox.json"), CHECKBOX_JSON)?;

	common::compdoc_cmd(tmp.path())
		.args(["checkbox.json", "--section", "API"])
		.assert()
		.code(1)
		.stderr(predicates::str::contains(
			"--output is required when --section is set",
		));

	Ok(())
}

#[test]
fn section_is_replaced_in_output_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("checkbox.json"), CHECKBOX_JSON)?;
	std::fs::write(tmp.path().join("README.md"), README)?;

	common::compdoc_cmd(tmp.path())
		.args([
			"checkbox.json",
			"--output",
			"README.md",
			"--section",
			"API",
			"--level",
			"3",
		])
		.assert()
		.success()
		.stdout(predicates::str::contains("Updated README.md"));

	assert_eq!(std::fs::read_to_string(tmp.path().join("README.md"))?, MERGED);

	// Running again leaves the document as it is.
	common::compdoc_cmd(tmp.path())
		.args([
			"checkbox.json",
			"--output",
			"README.md",
			"--section",
			"API",
			"--level",
			"3",
		])
		.assert()
		.success()
		.stdout(predicates::str::contains("already up to date"));

	assert_eq!(std::fs::read_to_string(tmp.path().join("README.md"))?, MERGED);

	Ok(())
}

#[test]
fn section_and_output_from_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("checkbox.json"), CHECKBOX_JSON)?;
	std::fs::write(tmp.path().join("README.md"), README)?;
	std::fs::write(
		tmp.path().join("compdoc.toml"),
		"[render]\nlevel = 3\n\n[output]\npath = \"README.md\"\nsection = \"API\"\n",
	)?;

	common::compdoc_cmd(tmp.path())
		.arg("checkbox.json")
		.assert()
		.success();

	assert_eq!(std::fs::read_to_string(tmp.path().join("README.md"))?, MERGED);

	Ok(())
}

#[test]
fn missing_section_fails_without_writing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("checkbox.json"), CHECKBOX_JSON)?;
	std::fs::write(tmp.path().join("README.md"), README)?;

	common::compdoc_cmd(tmp.path())
		.args(["checkbox.json", "--output", "README.md", "--section", "Props"])
		.assert()
		.code(2)
		.stderr(predicates::str::contains("no heading titled `Props`"));

	assert_eq!(std::fs::read_to_string(tmp.path().join("README.md"))?, README);

	Ok(())
}

#[test]
fn missing_output_file_fails_with_section() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("checkbox.json"), CHECKBOX_JSON)?;

	common::compdoc_cmd(tmp.path())
		.args(["checkbox.json", "--output", "README.md", "--section", "API"])
		.assert()
		.code(2)
		.stderr(predicates::str::contains("cannot update section `API`"));

	assert!(!tmp.path().join("README.md").exists());

	Ok(())
}

#[test]
fn dry_run_shows_diff_without_writing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("checkbox.json"), CHECKBOX_JSON)?;
	std::fs::write(tmp.path().join("README.md"), README)?;

	common::compdoc_cmd(tmp.path())
		.args([
			"checkbox.json",
			"--output",
			"README.md",
			"--section",
			"API",
			"--level",
			"3",
			"--dry-run",
		])
		.assert()
		.success()
		.stdout(predicates::str::contains("Would update README.md"))
		.stdout(predicates::str::contains("-Outdated."))
		.stdout(predicates::str::contains("+### checkbox"))
		.stdout(predicates::str::contains(" ## License"));

	assert_eq!(std::fs::read_to_string(tmp.path().join("README.md"))?, README);

	Ok(())
}

#[test]
fn verbose_logs_to_stderr() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("checkbox.json"), CHECKBOX_JSON)?;
	std::fs::write(tmp.path().join("README.md"), README)?;

	common::compdoc_cmd(tmp.path())
		.args([
			"checkbox.json",
			"--output",
			"README.md",
			"--section",
			"API",
			"--verbose",
		])
		.assert()
		.success()
		.stderr(predicates::str::contains("located section"))
		.stdout(predicates::str::contains("located section").not());

	Ok(())
}
