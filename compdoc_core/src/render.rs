use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::CompdocError;
use crate::CompdocResult;

/// Documentation metadata for a single UI component.
///
/// ```json
/// {
///   "name": "checkbox",
///   "description": "A simple checkbox component",
///   "props": [{ "name": "model", "type": "Array", "required": true, "twoWay": true }],
///   "events": [{ "name": "enabled", "description": "Emitted when enabled" }],
///   "slots": [{ "name": "default" }],
///   "methods": [{ "name": "check", "params": ["value"] }]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentMetadata {
	pub name: Option<String>,
	pub description: Option<String>,
	pub props: Vec<PropDoc>,
	pub events: Vec<EventDoc>,
	pub slots: Vec<SlotDoc>,
	pub methods: Vec<MethodDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropDoc {
	pub name: String,
	#[serde(default, rename = "type")]
	pub kind: Option<String>,
	#[serde(default)]
	pub default: Option<serde_json::Value>,
	#[serde(default)]
	pub required: bool,
	#[serde(default, alias = "twoWay")]
	pub two_way: bool,
	#[serde(default)]
	pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDoc {
	pub name: String,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub arguments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotDoc {
	pub name: String,
	#[serde(default)]
	pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDoc {
	pub name: String,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub params: Vec<String>,
}

/// Serialization format of a component metadata file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataFormat {
	Json,
	Yaml,
	Toml,
}

impl MetadataFormat {
	/// Detect the format from a file extension.
	pub fn from_path(path: &Path) -> CompdocResult<Self> {
		let extension = path
			.extension()
			.and_then(|extension| extension.to_str())
			.unwrap_or_default();
		extension.parse()
	}
}

impl FromStr for MetadataFormat {
	type Err = CompdocError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.to_ascii_lowercase().as_str() {
			"json" => Ok(Self::Json),
			"yaml" | "yml" => Ok(Self::Yaml),
			"toml" => Ok(Self::Toml),
			_ => Err(CompdocError::UnsupportedMetadataFormat(value.to_string())),
		}
	}
}

impl fmt::Display for MetadataFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Json => write!(f, "json"),
			Self::Yaml => write!(f, "yaml"),
			Self::Toml => write!(f, "toml"),
		}
	}
}

/// Raw component metadata together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSource {
	/// Display name of the source, used as the component name when the
	/// metadata has none and in error messages.
	pub name: String,
	pub content: String,
	pub format: MetadataFormat,
}

impl ComponentSource {
	pub fn new(name: impl Into<String>, content: impl Into<String>, format: MetadataFormat) -> Self {
		Self {
			name: name.into(),
			content: content.into(),
			format,
		}
	}

	/// Read a metadata file, detecting its format from the extension.
	pub fn from_path(path: &Path) -> CompdocResult<Self> {
		let format = MetadataFormat::from_path(path)?;
		let content = std::fs::read_to_string(path)?;
		let name = path
			.file_stem()
			.map_or_else(|| path.display().to_string(), |stem| stem.to_string_lossy().into_owned());

		Ok(Self::new(name, content, format))
	}

	/// Deserialize the metadata. Malformed input is a render failure.
	pub fn metadata(&self) -> CompdocResult<ComponentMetadata> {
		let parsed = match self.format {
			MetadataFormat::Json => {
				serde_json::from_str::<ComponentMetadata>(&self.content).map_err(|e| e.to_string())
			}
			MetadataFormat::Yaml => {
				serde_yaml_ng::from_str::<ComponentMetadata>(&self.content)
					.map_err(|e| e.to_string())
			}
			MetadataFormat::Toml => {
				toml::from_str::<ComponentMetadata>(&self.content).map_err(|e| e.to_string())
			}
		};

		parsed.map_err(|reason| {
			CompdocError::RenderFailure {
				source_name: self.name.clone(),
				reason,
			}
		})
	}
}

/// Options shaping the rendered fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
	/// Heading level of the component name (1–6). Sub-sections use the next
	/// level down.
	pub level: u8,
	/// Leave out the component name heading.
	pub ignore_name: bool,
	/// Leave out the component description.
	pub ignore_description: bool,
	/// A minijinja template replacing the built-in layout.
	pub template: Option<String>,
}

impl Default for RenderOptions {
	fn default() -> Self {
		Self {
			level: 1,
			ignore_name: false,
			ignore_description: false,
			template: None,
		}
	}
}

/// Turns component sources into markdown fragments.
pub trait FragmentRenderer {
	fn render(&self, source: &ComponentSource) -> CompdocResult<String>;
}

/// The default [`FragmentRenderer`] for structured component metadata.
#[derive(Debug, Clone, Default)]
pub struct MetadataRenderer {
	options: RenderOptions,
}

impl MetadataRenderer {
	pub fn new(options: RenderOptions) -> Self {
		Self { options }
	}

	pub fn options(&self) -> &RenderOptions {
		&self.options
	}
}

impl FragmentRenderer for MetadataRenderer {
	fn render(&self, source: &ComponentSource) -> CompdocResult<String> {
		let mut component = source.metadata()?;
		if component.name.is_none() {
			component.name = Some(source.name.clone());
		}
		tracing::debug!(
			source = %source.name,
			format = %source.format,
			props = component.props.len(),
			events = component.events.len(),
			"rendering component documentation"
		);

		match &self.options.template {
			Some(template) => render_with_template(template, &component, &self.options, &source.name),
			None => render_component(&component, &self.options),
		}
	}
}

/// Render component metadata with the built-in layout.
pub fn render_component(
	component: &ComponentMetadata,
	options: &RenderOptions,
) -> CompdocResult<String> {
	let (title_marker, section_marker) = heading_markers(options.level)?;
	let mut blocks: Vec<String> = Vec::new();

	if !options.ignore_name {
		if let Some(name) = component.name.as_deref().filter(|name| !name.is_empty()) {
			blocks.push(format!("{title_marker} {name}"));
		}
	}

	if !options.ignore_description {
		if let Some(description) = non_empty(component.description.as_deref()) {
			blocks.push(description.trim().to_string());
		}
	}

	if !component.props.is_empty() {
		blocks.push(format!("{section_marker} props"));
		blocks.push(render_items(component.props.iter().map(|prop| {
			let mut summary = format!("`{}`", prop.name);
			if let Some(kind) = non_empty(prop.kind.as_deref()) {
				summary.push_str(&format!(" ***{kind}***"));
			}
			summary.push_str(if prop.required {
				" (*required*)"
			} else {
				" (*optional*)"
			});
			if prop.two_way {
				summary.push_str(" `twoWay = true`");
			}
			if let Some(default) = &prop.default {
				summary.push_str(&format!(" `default: {}`", display_value(default)));
			}
			(summary, prop.description.as_deref())
		})));
	}

	if !component.events.is_empty() {
		blocks.push(format!("{section_marker} events"));
		blocks.push(render_items(component.events.iter().map(|event| {
			let mut summary = format!("`{}`", event.name);
			if !event.arguments.is_empty() {
				summary.push_str(&format!(" ({})", event.arguments.join(", ")));
			}
			(summary, event.description.as_deref())
		})));
	}

	if !component.slots.is_empty() {
		blocks.push(format!("{section_marker} slots"));
		blocks.push(render_items(component.slots.iter().map(|slot| {
			(format!("`{}`", slot.name), slot.description.as_deref())
		})));
	}

	if !component.methods.is_empty() {
		blocks.push(format!("{section_marker} methods"));
		blocks.push(render_items(component.methods.iter().map(|method| {
			(
				format!("`{}({})`", method.name, method.params.join(", ")),
				method.description.as_deref(),
			)
		})));
	}

	if blocks.is_empty() {
		return Ok(String::new());
	}

	let mut fragment = blocks.join("\n\n");
	fragment.push('\n');
	Ok(fragment)
}

#[derive(Serialize)]
struct TemplateContext<'a> {
	#[serde(flatten)]
	component: &'a ComponentMetadata,
	level: u8,
	h1: String,
	h2: String,
}

/// Render component metadata through a user supplied minijinja template.
///
/// The template sees the metadata fields (`name`, `description`, `props`,
/// `events`, `slots`, `methods`) along with `level` and the heading markers
/// `h1` (component) and `h2` (sub-sections).
pub fn render_with_template(
	template: &str,
	component: &ComponentMetadata,
	options: &RenderOptions,
	source_name: &str,
) -> CompdocResult<String> {
	let (h1, h2) = heading_markers(options.level)?;
	let mut component = component.clone();
	if options.ignore_name {
		component.name = None;
	}
	if options.ignore_description {
		component.description = None;
	}

	let to_render_failure = |e: minijinja::Error| {
		CompdocError::RenderFailure {
			source_name: source_name.to_string(),
			reason: e.to_string(),
		}
	};

	let mut env = minijinja::Environment::new();
	env.set_keep_trailing_newline(true);
	env.add_template("__component__", template)
		.map_err(to_render_failure)?;
	let template = env
		.get_template("__component__")
		.map_err(to_render_failure)?;

	let ctx = minijinja::Value::from_serialize(TemplateContext {
		component: &component,
		level: options.level,
		h1,
		h2,
	});
	template.render(ctx).map_err(to_render_failure)
}

fn heading_markers(level: u8) -> CompdocResult<(String, String)> {
	if !(1..=6).contains(&level) {
		return Err(CompdocError::InvalidHeadingLevel(level));
	}
	let sub_level = (level + 1).min(6);
	Ok((
		"#".repeat(usize::from(level)),
		"#".repeat(usize::from(sub_level)),
	))
}

/// Render `(summary, description)` pairs as a loose bullet list.
fn render_items<'a>(items: impl Iterator<Item = (String, Option<&'a str>)>) -> String {
	items
		.map(|(summary, description)| {
			match non_empty(description) {
				Some(description) => {
					let body = description
						.trim()
						.lines()
						.map(|line| {
							if line.trim().is_empty() {
								String::new()
							} else {
								format!("  {line}")
							}
						})
						.collect::<Vec<_>>()
						.join("\n");
					format!("- {summary}\n\n{body}")
				}
				None => format!("- {summary}"),
			}
		})
		.collect::<Vec<_>>()
		.join("\n\n")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
	value.filter(|value| !value.trim().is_empty())
}

fn display_value(value: &serde_json::Value) -> String {
	match value {
		serde_json::Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}
