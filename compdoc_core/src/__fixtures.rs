use crate::Node;
use crate::NodeKind;

pub const CHECKBOX_JSON: &str = r#"{
  "name": "checkbox",
  "description": "A simple checkbox component",
  "props": [
    {
      "name": "model",
      "type": "Array",
      "required": true,
      "twoWay": true,
      "description": "The checkbox model"
    },
    {
      "name": "disabled",
      "type": "Boolean",
      "default": false,
      "description": "Initial checkbox state"
    }
  ],
  "events": [
    { "name": "enabled", "description": "Emitted when the component has been enabled" }
  ],
  "slots": [
    { "name": "default", "description": "Label content" }
  ],
  "methods": [
    { "name": "check", "description": "Check the checkbox" }
  ]
}"#;

pub const CHECKBOX_MARKDOWN: &str = "# checkbox

A simple checkbox component

## props

- `model` ***Array*** (*required*) `twoWay = true`

  The checkbox model

- `disabled` ***Boolean*** (*optional*) `default: false`

  Initial checkbox state

## events

- `enabled`

  Emitted when the component has been enabled

## slots

- `default`

  Label content

## methods

- `check()`

  Check the checkbox
";

pub const TEXTAREA_YAML: &str = "name: textarea
description: |
  Multi-line text input.
  Grows with its content.
props:
  - name: value
    type: String
    default: ''
";

pub const TEXTAREA_TOML: &str = r#"name = "textarea"
description = "Multi-line text input."

[[props]]
name = "rows"
type = "Number"
default = 3

[[events]]
name = "input"
arguments = ["value"]
"#;

pub const README: &str = "# Checkbox

A checkbox for forms.

## Install

```sh
npm install checkbox
```

## API

Outdated documentation.

### Legacy

- still here

## License

MIT
";

/// Flatten a node into `(kind, value)` pairs, depth first. Used to compare
/// structure independently of source text.
pub fn outline(node: &Node) -> Vec<(NodeKind, Option<String>)> {
	node.descendants()
		.map(|descendant| {
			(
				descendant.kind().clone(),
				descendant.value().map(ToString::to_string),
			)
		})
		.collect()
}
