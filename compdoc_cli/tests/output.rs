mod common;

use compdoc_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;

use self::common::CHECKBOX_JSON;
use self::common::CHECKBOX_MARKDOWN;

#[test]
fn prints_documentation_to_stdout() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("checkbox.json"), CHECKBOX_JSON)?;

	common::compdoc_cmd(tmp.path())
		.arg("checkbox.json")
		.assert()
		.success()
		.stdout(CHECKBOX_MARKDOWN);

	Ok(())
}

#[test]
fn reads_metadata_from_stdin() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::compdoc_cmd(tmp.path())
		.args(["--format", "yaml", "--level", "2"])
		.write_stdin("name: tabs\nslots:\n  - name: default\n")
		.assert()
		.success()
		.stdout("## tabs\n\n### slots\n\n- `default`\n");

	Ok(())
}

#[test]
fn ignore_flags_drop_name_and_description() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("checkbox.json"), CHECKBOX_JSON)?;

	common::compdoc_cmd(tmp.path())
		.args(["checkbox.json", "--ignore-name", "--ignore-description"])
		.assert()
		.success()
		.stdout(predicates::str::starts_with("## props\n"))
		.stdout(predicates::str::contains("A simple checkbox component").not());

	Ok(())
}

#[test]
fn writes_output_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("checkbox.json"), CHECKBOX_JSON)?;

	common::compdoc_cmd(tmp.path())
		.args(["checkbox.json", "--output", "docs.md"])
		.assert()
		.success()
		.stdout(predicates::str::contains("Updated docs.md"));

	let content = std::fs::read_to_string(tmp.path().join("docs.md"))?;
	similar_asserts::assert_eq!(content, CHECKBOX_MARKDOWN);

	common::compdoc_cmd(tmp.path())
		.args(["checkbox.json", "--output", "docs.md"])
		.assert()
		.success()
		.stdout(predicates::str::contains("already up to date"));

	Ok(())
}

#[test]
fn output_directory_is_rejected() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("checkbox.json"), CHECKBOX_JSON)?;
	std::fs::create_dir(tmp.path().join("docs"))?;

	common::compdoc_cmd(tmp.path())
		.args(["checkbox.json", "--output", "docs"])
		.assert()
		.code(1)
		.stderr(predicates::str::contains("--output value must be a file"));

	Ok(())
}

#[test]
fn missing_input_file_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("checkbox.json"), CHECKBOX_JSON)?;

	common::compdoc_cmd(tmp.path())
		.args(["checkbox.json", "missing.json", "--output", "docs.md"])
		.assert()
		.code(2)
		.stderr(predicates::str::contains("file not found"));

	assert!(!tmp.path().join("docs.md").exists());

	Ok(())
}

#[test]
fn unsupported_extension_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("checkbox.vue"), "<template></template>")?;

	common::compdoc_cmd(tmp.path())
		.arg("checkbox.vue")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("unsupported component metadata format"));

	Ok(())
}

#[test]
fn invalid_level_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("checkbox.json"), CHECKBOX_JSON)?;

	common::compdoc_cmd(tmp.path())
		.args(["checkbox.json", "--level", "9"])
		.assert()
		.code(1)
		.stderr(predicates::str::contains("invalid heading level: 9"));

	Ok(())
}

#[test]
fn config_file_supplies_defaults() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("checkbox.json"), CHECKBOX_JSON)?;
	std::fs::write(
		tmp.path().join("compdoc.toml"),
		"[render]\nlevel = 2\nignore_description = true\n",
	)?;

	common::compdoc_cmd(tmp.path())
		.arg("checkbox.json")
		.assert()
		.success()
		.stdout("## checkbox\n\n### props\n\n- `model` ***Array*** (*required*) `twoWay = true`\n");

	Ok(())
}

#[test]
fn config_template_is_used() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("checkbox.json"), CHECKBOX_JSON)?;
	std::fs::write(
		tmp.path().join("component.md.jinja"),
		"{{ h1 }} {{ name }}\n\n{% for prop in props %}* {{ prop.name }}: {{ prop.type }}\n{% endfor %}",
	)?;
	std::fs::write(
		tmp.path().join("compdoc.toml"),
		"[render]\ntemplate = \"component.md.jinja\"\n",
	)?;

	common::compdoc_cmd(tmp.path())
		.arg("checkbox.json")
		.assert()
		.success()
		.stdout("# checkbox\n\n* model: Array\n");

	Ok(())
}

#[test]
fn malformed_config_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("checkbox.json"), CHECKBOX_JSON)?;
	std::fs::write(tmp.path().join("compdoc.toml"), "[render\n")?;

	common::compdoc_cmd(tmp.path())
		.arg("checkbox.json")
		.assert()
		.code(1)
		.stderr(predicates::str::contains("failed to parse config file"));

	Ok(())
}
