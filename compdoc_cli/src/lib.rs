use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use compdoc_core::CompdocConfig;
use compdoc_core::CompdocError;
use compdoc_core::CompdocResult;
use compdoc_core::ComponentSource;
use compdoc_core::FragmentRenderer;
use compdoc_core::MergeRequest;
use compdoc_core::MetadataFormat;
use compdoc_core::MetadataRenderer;
use compdoc_core::RenderOptions;

pub mod logging;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Generate markdown documentation for UI components.",
	long_about = "compdoc renders markdown documentation from component metadata (json, yaml or \
	              toml) and prints it, writes it to a file, or replaces a single section of an \
	              existing document with it.\n\nExamples:\n  compdoc checkbox.json\n  compdoc \
	              checkbox.json --output README.md\n  compdoc checkbox.json --output README.md \
	              --section API --level 3"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct CompdocCli {
	/// Component metadata files. Metadata is read from stdin when no files
	/// are given.
	pub files: Vec<PathBuf>,

	/// Heading level of the component name (1-6). Sub-sections use the next
	/// level down.
	#[arg(long)]
	pub level: Option<u8>,

	/// File to write the documentation to.
	#[arg(long, short)]
	pub output: Option<PathBuf>,

	/// Replace only the section under this heading in the `--output` file.
	#[arg(long, short)]
	pub section: Option<String>,

	/// Leave out the component name heading.
	#[arg(long, default_value_t = false)]
	pub ignore_name: bool,

	/// Leave out the component description.
	#[arg(long, default_value_t = false)]
	pub ignore_description: bool,

	/// Format of metadata read from stdin.
	#[arg(long, value_enum, default_value_t = InputFormat::Json)]
	pub format: InputFormat,

	/// Show the changes to the `--output` file without writing it.
	#[arg(long, default_value_t = false)]
	pub dry_run: bool,

	/// Directory holding `compdoc.toml`. Defaults to the current directory.
	#[arg(long, short)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
	/// JSON metadata.
	Json,
	/// YAML metadata.
	Yaml,
	/// TOML metadata.
	Toml,
}

impl From<InputFormat> for MetadataFormat {
	fn from(format: InputFormat) -> Self {
		match format {
			InputFormat::Json => MetadataFormat::Json,
			InputFormat::Yaml => MetadataFormat::Yaml,
			InputFormat::Toml => MetadataFormat::Toml,
		}
	}
}

/// Where component metadata comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
	Files(Vec<PathBuf>),
	Stdin(MetadataFormat),
}

/// Validated settings for one run, combining command line flags with
/// `compdoc.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
	pub input: Input,
	pub render: RenderOptions,
	pub output: Option<PathBuf>,
	pub section: Option<String>,
	pub dry_run: bool,
}

impl Options {
	/// Resolve the options for `cli`, loading config from `root`. Flags
	/// override config values.
	pub fn from_cli(cli: &CompdocCli, root: &Path) -> CompdocResult<Self> {
		let config = CompdocConfig::load(root)?.unwrap_or_default();
		let mut render = config.render_options(root)?;

		if let Some(level) = cli.level {
			render.level = level;
		}
		if !(1..=6).contains(&render.level) {
			return Err(CompdocError::InvalidHeadingLevel(render.level));
		}
		render.ignore_name |= cli.ignore_name;
		render.ignore_description |= cli.ignore_description;

		let output = cli
			.output
			.clone()
			.or_else(|| config.output.path.as_ref().map(|path| root.join(path)));
		let section = cli.section.clone().or(config.output.section);

		if let Some(section) = &section {
			if section.trim().is_empty() {
				return Err(CompdocError::EmptySection);
			}
			if output.is_none() {
				return Err(CompdocError::MissingOutput);
			}
		}

		if let Some(output) = &output {
			if output.is_dir() {
				return Err(CompdocError::OutputNotFile(output.display().to_string()));
			}
		}

		let input = if cli.files.is_empty() {
			Input::Stdin(cli.format.into())
		} else {
			Input::Files(cli.files.clone())
		};

		Ok(Self {
			input,
			render,
			output,
			section,
			dry_run: cli.dry_run,
		})
	}
}

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
	/// The documentation was written to the output stream.
	Printed,
	/// The output file was written, or left alone because it already held
	/// the expected content.
	Written { path: PathBuf, changed: bool },
	/// Nothing was written. `current` is the file content on disk (empty if
	/// the file does not exist) and `expected` what would be written.
	Preview {
		path: PathBuf,
		current: String,
		expected: String,
	},
}

/// Render the documentation for every input and deliver it according to
/// `options`: to `out` when there is no output file, otherwise to the file,
/// either whole or merged into the configured section.
///
/// The output file is only written once the merge has succeeded.
pub fn run(options: &Options, stdin: &mut dyn Read, out: &mut dyn Write) -> CompdocResult<Outcome> {
	let sources = load_sources(&options.input, stdin)?;
	let renderer = MetadataRenderer::new(options.render.clone());
	let fragment = render_fragments(&renderer, &sources)?;

	let Some(path) = &options.output else {
		out.write_all(fragment.as_bytes())?;
		out.flush()?;
		return Ok(Outcome::Printed);
	};

	let existing = read_existing(path)?;
	let mut request = MergeRequest::new(fragment);
	if let Some(existing) = &existing {
		request = request.existing(existing.as_str());
	}
	if let Some(section) = &options.section {
		request = request.section(section.as_str());
	}
	let expected = request.run()?;
	let current = existing.unwrap_or_default();

	if options.dry_run {
		return Ok(Outcome::Preview {
			path: path.clone(),
			current,
			expected,
		});
	}

	let changed = current != expected || !path.exists();
	if changed {
		std::fs::write(path, &expected)?;
	}
	tracing::debug!(path = %path.display(), changed, "wrote output file");

	Ok(Outcome::Written {
		path: path.clone(),
		changed,
	})
}

/// Read every component source. All files are checked for existence before
/// any of them is read.
pub fn load_sources(input: &Input, stdin: &mut dyn Read) -> CompdocResult<Vec<ComponentSource>> {
	match input {
		Input::Files(files) => {
			if let Some(missing) = files.iter().find(|file| !file.is_file()) {
				return Err(CompdocError::FileNotFound(missing.display().to_string()));
			}
			files
				.iter()
				.map(|file| ComponentSource::from_path(file))
				.collect()
		}
		Input::Stdin(format) => {
			let mut content = String::new();
			stdin.read_to_string(&mut content)?;
			Ok(vec![ComponentSource::new("stdin", content, *format)])
		}
	}
}

/// Render each source and join the fragments with a blank line, in input
/// order.
pub fn render_fragments(
	renderer: &dyn FragmentRenderer,
	sources: &[ComponentSource],
) -> CompdocResult<String> {
	let mut fragments = Vec::with_capacity(sources.len());
	for source in sources {
		let fragment = renderer.render(source)?;
		let fragment = fragment.trim_end_matches(['\n', '\r']);
		if !fragment.is_empty() {
			fragments.push(fragment.to_string());
		}
	}

	if fragments.is_empty() {
		return Ok(String::new());
	}

	let mut joined = fragments.join("\n\n");
	joined.push('\n');
	Ok(joined)
}

fn read_existing(path: &Path) -> CompdocResult<Option<String>> {
	match std::fs::read_to_string(path) {
		Ok(content) => Ok(Some(content)),
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
		Err(e) => Err(e.into()),
	}
}
