use std::ops::Range;

use crate::Document;
use crate::Node;
use crate::NodeKind;
use crate::serializer::serialize_node;
use crate::tree::ensure_blank_line;

/// A located section of a [`Document`].
///
/// The section starts at the heading at [`index`](Section::index) and runs up
/// to, but not including, [`end`](Section::end): the next top-level heading
/// with a level equal to or shallower than this one, or the end of the
/// document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
	/// Position of the heading in the document's top-level children.
	pub index: usize,
	/// Depth of the heading (1–6).
	pub level: u8,
	/// Exclusive end of the section.
	pub end: usize,
}

impl Section {
	/// Range of the blocks under the heading.
	pub fn body(&self) -> Range<usize> {
		self.index + 1..self.end
	}

	/// True when the heading is directly followed by the next section.
	pub fn is_empty(&self) -> bool {
		self.body().is_empty()
	}
}

/// Text of the first `Str` found walking `node` depth first.
pub fn first_text(node: &Node) -> Option<&str> {
	node.descendants()
		.find(|descendant| matches!(descendant.kind(), NodeKind::Str))
		.and_then(Node::value)
}

/// Whether `node` is a heading titled exactly `title`.
pub fn is_section_heading(node: &Node, title: &str) -> bool {
	node.level().is_some() && first_text(node) == Some(title)
}

/// Find the first top-level heading whose text is exactly `title` and
/// compute the extent of its section.
///
/// Matching is case-sensitive and does not trim. When several headings share
/// the same title only the first one is reachable.
pub fn find_section(document: &Document, title: &str) -> Option<Section> {
	let children = document.children();
	let index = children
		.iter()
		.position(|node| is_section_heading(node, title))?;
	let level = children[index].level()?;
	let end = children[index + 1..]
		.iter()
		.position(|node| node.level().is_some_and(|other| other <= level))
		.map_or(children.len(), |offset| index + 1 + offset);

	tracing::debug!(title, index, level, end, "located section");

	Some(Section { index, level, end })
}

/// Replace the body of `section` with the top-level blocks of `replacement`.
///
/// The heading and every block outside the section are left untouched. Only
/// the separators at the two seams are adjusted so that the inserted blocks
/// stay separate blocks when the output is parsed again. An empty
/// replacement removes the body.
pub fn replace_section(document: &mut Document, section: &Section, replacement: Document) {
	let len = document.len();
	if section.index >= len {
		tracing::warn!(index = section.index, len, "section is out of bounds, nothing replaced");
		return;
	}

	let end = section.end.clamp(section.index + 1, len);
	let body = section.index + 1..end;
	let followed = end < len;
	let children = document.children_mut();
	let tail = children[end - 1].trailing.clone();
	let mut nodes = replacement.into_children();

	tracing::debug!(
		removed = body.len(),
		inserted = nodes.len(),
		followed,
		"replacing section body"
	);

	match nodes.last_mut() {
		Some(last) => {
			last.trailing = tail;
			if followed {
				ensure_blank_line(&mut last.trailing);
			}
			let heading = &mut children[section.index];
			if !heading.trailing.contains('\n') {
				ensure_blank_line(&mut heading.trailing);
			}
		}
		None => {
			let heading = &mut children[section.index];
			heading.trailing = tail;
			if followed && !heading.trailing.contains('\n') {
				ensure_blank_line(&mut heading.trailing);
			}
		}
	}

	children.splice(body, nodes);
}

/// Replace the heading node of `section` alone with the blocks of
/// `replacement`, leaving the section body in place.
pub fn replace_heading(document: &mut Document, section: &Section, replacement: Document) {
	let len = document.len();
	if section.index >= len {
		tracing::warn!(index = section.index, len, "section is out of bounds, nothing replaced");
		return;
	}

	let followed = section.index + 1 < len;
	let children = document.children_mut();
	let tail = children[section.index].trailing.clone();
	let mut nodes = replacement.into_children();

	if let Some(last) = nodes.last_mut() {
		last.trailing = tail;
		if followed && !last.trailing.contains('\n') {
			ensure_blank_line(&mut last.trailing);
		}
	} else if section.index > 0 {
		// Removing the heading: the previous block takes over its separator.
		children[section.index - 1].trailing = tail;
	}

	children.splice(section.index..=section.index, nodes);
}

/// The markdown text of the blocks under the heading of `section`, without
/// the separator after the last block.
pub fn section_body(document: &Document, section: &Section) -> String {
	let children = document.children();
	let end = section.end.min(children.len());
	let start = (section.index + 1).min(end);
	let mut text = String::new();

	for (offset, node) in children[start..end].iter().enumerate() {
		text.push_str(&serialize_node(node));
		if start + offset + 1 < end {
			text.push_str(&node.trailing);
		}
	}

	text
}
