use crate::CompdocError;
use crate::CompdocResult;
use crate::find_section;
use crate::parse;
use crate::parse_fragment;
use crate::replace_section;
use crate::serialize;

/// Combine a freshly rendered fragment with an existing document.
///
/// - Without a `section`, the fragment is the whole output and is returned
///   unchanged.
/// - With a `section`, the body of the first heading titled `section` in
///   `existing` is replaced by the fragment and the rest of the document is
///   reproduced as it was.
///
/// Fails with [`CompdocError::SectionTargetMissing`] when a section is
/// requested but there is no existing document (absent or empty), and with
/// [`CompdocError::SectionNotFound`] when no heading matches. A failed merge
/// never produces partial output.
pub fn merge(
	existing: Option<&str>,
	fragment: &str,
	section: Option<&str>,
) -> CompdocResult<String> {
	let Some(title) = section else {
		return Ok(fragment.to_string());
	};

	let existing = existing.filter(|text| !text.is_empty());
	let Some(existing) = existing else {
		return Err(CompdocError::SectionTargetMissing(title.to_string()));
	};

	let mut document = parse(existing)?;
	let Some(target) = find_section(&document, title) else {
		return Err(CompdocError::SectionNotFound(title.to_string()));
	};

	let replacement = parse_fragment(fragment)?;
	tracing::debug!(
		title,
		heading = target.index,
		replaced = target.body().len(),
		inserted = replacement.len(),
		"merging fragment into section"
	);
	replace_section(&mut document, &target, replacement);

	Ok(serialize(&document))
}

/// Inputs for a single [`merge`], assembled piece by piece.
#[derive(Debug, Clone, Default)]
pub struct MergeRequest {
	/// Text of the document being updated, if one exists.
	pub existing: Option<String>,
	/// The rendered markdown fragment.
	pub fragment: String,
	/// Title of the section to replace. `None` writes the fragment as the
	/// whole document.
	pub section: Option<String>,
}

impl MergeRequest {
	pub fn new(fragment: impl Into<String>) -> Self {
		Self {
			fragment: fragment.into(),
			..Self::default()
		}
	}

	#[must_use]
	pub fn existing(mut self, existing: impl Into<String>) -> Self {
		self.existing = Some(existing.into());
		self
	}

	#[must_use]
	pub fn section(mut self, section: impl Into<String>) -> Self {
		self.section = Some(section.into());
		self
	}

	/// Whether this request targets a section of an existing document.
	pub fn is_section_update(&self) -> bool {
		self.section.is_some()
	}

	pub fn run(&self) -> CompdocResult<String> {
		merge(
			self.existing.as_deref(),
			&self.fragment,
			self.section.as_deref(),
		)
	}
}
