use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum CompdocError {
	#[error(transparent)]
	#[diagnostic(code(compdoc::io_error))]
	Io(#[from] std::io::Error),

	#[error("failure to load markdown: {0}")]
	#[diagnostic(code(compdoc::markdown))]
	Markdown(String),

	#[error("cannot update section `{0}`: there is no existing document to merge into")]
	#[diagnostic(
		code(compdoc::section_target_missing),
		help("create the output file with a `{0}` heading first, or drop `--section`")
	)]
	SectionTargetMissing(String),

	#[error("no heading titled `{0}` was found in the existing document")]
	#[diagnostic(
		code(compdoc::section_not_found),
		help("section titles are matched exactly and case-sensitively against heading text")
	)]
	SectionNotFound(String),

	#[error("failed to render documentation for `{source_name}`: {reason}")]
	#[diagnostic(code(compdoc::render_failure))]
	RenderFailure { source_name: String, reason: String },

	#[error("unsupported component metadata format: `{0}`")]
	#[diagnostic(
		code(compdoc::unsupported_format),
		help("supported formats: json, yaml, yml, toml")
	)]
	UnsupportedMetadataFormat(String),

	#[error("invalid heading level: {0}")]
	#[diagnostic(
		code(compdoc::invalid_level),
		help("markdown headings range from level 1 to level 6")
	)]
	InvalidHeadingLevel(u8),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(compdoc::config_parse),
		help("check that compdoc.toml is valid TOML with [render] and/or [output] sections")
	)]
	ConfigParse(String),

	#[error("--output is required when --section is set")]
	#[diagnostic(code(compdoc::missing_output))]
	MissingOutput,

	#[error("--section value must not be empty")]
	#[diagnostic(code(compdoc::empty_section))]
	EmptySection,

	#[error("--output value must be a file: `{0}`")]
	#[diagnostic(code(compdoc::output_not_file))]
	OutputNotFile(String),

	#[error("missing filename: no component files given and stdin is a terminal")]
	#[diagnostic(
		code(compdoc::missing_input),
		help("pass one or more component metadata files, or pipe metadata into stdin")
	)]
	MissingInput,

	#[error("file not found: `{0}`")]
	#[diagnostic(code(compdoc::file_not_found))]
	FileNotFound(String),
}

impl CompdocError {
	/// Whether this error was caused by invalid invocation rather than a
	/// failure while processing valid input.
	pub fn is_usage_error(&self) -> bool {
		matches!(
			self,
			Self::MissingOutput
				| Self::EmptySection
				| Self::OutputNotFile(_)
				| Self::MissingInput
				| Self::InvalidHeadingLevel(_)
				| Self::ConfigParse(_)
		)
	}
}

pub type CompdocResult<T> = Result<T, CompdocError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
