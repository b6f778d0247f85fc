use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub const CHECKBOX_JSON: &str = r#"{
  "name": "checkbox",
  "description": "A simple checkbox component",
  "props": [
    { "name": "model", "type": "Array", "required": true, "twoWay": true }
  ]
}"#;

pub const CHECKBOX_MARKDOWN: &str =
	"# checkbox\n\nA simple checkbox component\n\n## props\n\n- `model` ***Array*** (*required*) \
	 `twoWay = true`\n";

/// A `compdoc` command running inside `dir`, with colors off.
pub fn compdoc_cmd(dir: &std::path::Path) -> Command {
	let mut cmd = Command::new(get_cargo_bin("compdoc"));
	cmd.env("NO_COLOR", "1")
		.env_remove("COMPDOC_LOG")
		.current_dir(dir)
		.arg("--path")
		.arg(dir);
	cmd
}
