use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::CompdocError;
use crate::CompdocResult;
use crate::RenderOptions;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["compdoc.toml", ".compdoc.toml", ".config/compdoc.toml"];

/// Configuration loaded from a `compdoc.toml` file.
///
/// ```toml
/// [render]
/// level = 2
/// ignore_name = false
/// ignore_description = false
/// template = "docs/component.md.jinja"
///
/// [output]
/// path = "README.md"
/// section = "API"
/// ```
///
/// Command line flags take precedence over every value here.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct CompdocConfig {
	#[serde(default)]
	pub render: RenderConfig,
	#[serde(default)]
	pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct RenderConfig {
	/// Heading level of the component name.
	pub level: Option<u8>,
	#[serde(default)]
	pub ignore_name: bool,
	#[serde(default)]
	pub ignore_description: bool,
	/// Path to a minijinja template, relative to the config root.
	pub template: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
	/// Document to write to, relative to the config root.
	pub path: Option<PathBuf>,
	/// Heading of the section to replace in `path`.
	pub section: Option<String>,
}

impl CompdocConfig {
	/// Resolve the first config file that exists at `root`.
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if there is no config file.
	pub fn load(root: &Path) -> CompdocResult<Option<CompdocConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		tracing::debug!(path = %config_path.display(), "loading config");
		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::from_toml(&content)?;

		Ok(Some(config))
	}

	pub fn from_toml(content: &str) -> CompdocResult<Self> {
		toml::from_str(content).map_err(|e| CompdocError::ConfigParse(e.to_string()))
	}

	/// Build render options from the `[render]` table, reading the template
	/// file (if any) relative to `root`.
	pub fn render_options(&self, root: &Path) -> CompdocResult<RenderOptions> {
		let defaults = RenderOptions::default();
		let template = match &self.render.template {
			Some(path) => Some(std::fs::read_to_string(root.join(path))?),
			None => None,
		};

		Ok(RenderOptions {
			level: self.render.level.unwrap_or(defaults.level),
			ignore_name: self.render.ignore_name,
			ignore_description: self.render.ignore_description,
			template,
		})
	}
}
