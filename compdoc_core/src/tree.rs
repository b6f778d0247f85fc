use markdown::ParseOptions;
use markdown::mdast;
use markdown::to_mdast;
use serde::Deserialize;
use serde::Serialize;

use crate::CompdocError;
use crate::CompdocResult;

/// The structural kind of a [`Node`].
///
/// This is a closed set: every construct the parser can produce maps onto
/// exactly one variant, and consumers are expected to `match` exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
	/// An ATX (`## Title`) or setext heading.
	Header { level: u8 },
	Paragraph,
	/// Plain text. The decoded text lives in [`Node::value`].
	Str,
	Emphasis,
	Strong,
	/// GFM strikethrough (`~~text~~`).
	Delete,
	InlineCode,
	/// A hard line break.
	Break,
	Link {
		url: String,
		title: Option<String>,
	},
	Image {
		url: String,
		alt: String,
		title: Option<String>,
	},
	/// `[text][label]`, `[label][]` or `[label]`.
	LinkReference { label: String },
	ImageReference { label: String, alt: String },
	/// A fenced or indented code block.
	CodeBlock {
		lang: Option<String>,
		meta: Option<String>,
	},
	List { ordered: bool, start: Option<u32> },
	/// A list item. `checked` is set for GFM task list items.
	ListItem { checked: Option<bool> },
	BlockQuote,
	ThematicBreak,
	Html,
	Table { align: Vec<Align> },
	TableRow,
	TableCell,
	/// A link reference definition (`[label]: url "title"`).
	Definition {
		label: String,
		url: String,
		title: Option<String>,
	},
	FootnoteDefinition { label: String },
	FootnoteReference { label: String },
	/// YAML (`---`) or TOML (`+++`) front matter at the start of a document.
	FrontMatter { format: FrontMatterFormat },
}

impl NodeKind {
	/// A short, stable name for the kind, used in logs and debug output.
	pub fn name(&self) -> &'static str {
		match self {
			Self::Header { .. } => "Header",
			Self::Paragraph => "Paragraph",
			Self::Str => "Str",
			Self::Emphasis => "Emphasis",
			Self::Strong => "Strong",
			Self::Delete => "Delete",
			Self::InlineCode => "InlineCode",
			Self::Break => "Break",
			Self::Link { .. } => "Link",
			Self::Image { .. } => "Image",
			Self::LinkReference { .. } => "LinkReference",
			Self::ImageReference { .. } => "ImageReference",
			Self::CodeBlock { .. } => "CodeBlock",
			Self::List { .. } => "List",
			Self::ListItem { .. } => "ListItem",
			Self::BlockQuote => "BlockQuote",
			Self::ThematicBreak => "ThematicBreak",
			Self::Html => "Html",
			Self::Table { .. } => "Table",
			Self::TableRow => "TableRow",
			Self::TableCell => "TableCell",
			Self::Definition { .. } => "Definition",
			Self::FootnoteDefinition { .. } => "FootnoteDefinition",
			Self::FootnoteReference { .. } => "FootnoteReference",
			Self::FrontMatter { .. } => "FrontMatter",
		}
	}

	/// Whether the kind is a block-level construct (as opposed to inline
	/// content inside a paragraph or heading).
	pub fn is_block(&self) -> bool {
		match self {
			Self::Header { .. }
			| Self::Paragraph
			| Self::CodeBlock { .. }
			| Self::List { .. }
			| Self::ListItem { .. }
			| Self::BlockQuote
			| Self::ThematicBreak
			| Self::Html
			| Self::Table { .. }
			| Self::TableRow
			| Self::TableCell
			| Self::Definition { .. }
			| Self::FootnoteDefinition { .. }
			| Self::FrontMatter { .. } => true,
			Self::Str
			| Self::Emphasis
			| Self::Strong
			| Self::Delete
			| Self::InlineCode
			| Self::Break
			| Self::Link { .. }
			| Self::Image { .. }
			| Self::LinkReference { .. }
			| Self::ImageReference { .. }
			| Self::FootnoteReference { .. } => false,
		}
	}
}

/// Column alignment of a GFM table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
	None,
	Left,
	Right,
	Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrontMatterFormat {
	Yaml,
	Toml,
}

/// One structural unit of a markdown document.
///
/// Parsed nodes remember the exact source text they came from in
/// [`raw`](Node::raw). Synthesized nodes, and parsed nodes whose structure
/// has been changed through a mutating accessor, have no `raw` and are
/// rendered from their structure by the serializer instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
	kind: NodeKind,
	children: Vec<Node>,
	raw: Option<String>,
	value: Option<String>,
	/// Source text between this node and the next top-level block (or the
	/// end of the document). Only top-level blocks of a [`Document`] carry
	/// it; nested nodes leave it empty.
	pub trailing: String,
}

impl Node {
	/// Create a synthesized node with no children and no source text.
	pub fn new(kind: NodeKind) -> Self {
		Self {
			kind,
			children: Vec::new(),
			raw: None,
			value: None,
			trailing: String::new(),
		}
	}

	#[must_use]
	pub fn with_children(mut self, children: Vec<Node>) -> Self {
		self.children = children;
		self.raw = None;
		self
	}

	#[must_use]
	pub fn with_value(mut self, value: impl Into<String>) -> Self {
		self.value = Some(value.into());
		self.raw = None;
		self
	}

	/// A `Str` node holding `value`.
	pub fn text(value: impl Into<String>) -> Self {
		Self::new(NodeKind::Str).with_value(value)
	}

	/// A heading with a single `Str` child.
	pub fn header(level: u8, title: impl Into<String>) -> Self {
		Self::new(NodeKind::Header {
			level: level.clamp(1, 6),
		})
		.with_children(vec![Self::text(title)])
	}

	/// A paragraph with a single `Str` child.
	pub fn paragraph(text: impl Into<String>) -> Self {
		Self::new(NodeKind::Paragraph).with_children(vec![Self::text(text)])
	}

	pub fn code_block(lang: Option<&str>, code: impl Into<String>) -> Self {
		Self::new(NodeKind::CodeBlock {
			lang: lang.map(ToString::to_string),
			meta: None,
		})
		.with_value(code)
	}

	pub fn kind(&self) -> &NodeKind {
		&self.kind
	}

	pub fn children(&self) -> &[Node] {
		&self.children
	}

	/// Mutable access to the children. The node loses its `raw` text since
	/// it no longer reflects the structure.
	pub fn children_mut(&mut self) -> &mut Vec<Node> {
		self.raw = None;
		&mut self.children
	}

	pub fn raw(&self) -> Option<&str> {
		self.raw.as_deref()
	}

	pub fn value(&self) -> Option<&str> {
		self.value.as_deref()
	}

	/// Replace the decoded value, dropping the source text.
	pub fn set_value(&mut self, value: impl Into<String>) {
		self.value = Some(value.into());
		self.raw = None;
	}

	/// Replace the kind, dropping the source text.
	pub fn set_kind(&mut self, kind: NodeKind) {
		self.kind = kind;
		self.raw = None;
	}

	/// True when the node still carries the source text it was parsed from.
	pub fn is_pristine(&self) -> bool {
		self.raw.is_some()
	}

	/// Heading depth for `Header` nodes.
	pub fn level(&self) -> Option<u8> {
		match self.kind {
			NodeKind::Header { level } => Some(level),
			_ => None,
		}
	}

	/// Iterate over this node and all of its descendants, depth first, in
	/// document order.
	pub fn descendants(&self) -> Descendants<'_> {
		Descendants { stack: vec![self] }
	}
}

pub struct Descendants<'a> {
	stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
	type Item = &'a Node;

	fn next(&mut self) -> Option<Self::Item> {
		let node = self.stack.pop()?;
		self.stack.extend(node.children.iter().rev());
		Some(node)
	}
}

/// A parsed markdown document: a flat, ordered list of top-level blocks.
///
/// Sections are implicit. A heading and the blocks that follow it form a
/// section, see [`find_section`](crate::find_section).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
	/// Source text preceding the first block (blank lines, or the whole input
	/// when it contains no blocks).
	pub leading: String,
	children: Vec<Node>,
	source: String,
}

impl Document {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a document from synthesized blocks, separated by blank lines.
	pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> Self {
		let mut document = Self::new();
		for node in nodes {
			document.push(node);
		}
		document
	}

	pub fn children(&self) -> &[Node] {
		&self.children
	}

	pub fn children_mut(&mut self) -> &mut Vec<Node> {
		&mut self.children
	}

	pub fn into_children(self) -> Vec<Node> {
		self.children
	}

	/// The text this document was parsed from. Empty for synthesized
	/// documents. Not updated by mutations.
	pub fn source(&self) -> &str {
		&self.source
	}

	pub fn len(&self) -> usize {
		self.children.len()
	}

	pub fn is_empty(&self) -> bool {
		self.children.is_empty()
	}

	/// Append a block, making sure it is separated from the previous block
	/// by a blank line.
	pub fn push(&mut self, node: Node) {
		if let Some(last) = self.children.last_mut() {
			ensure_blank_line(&mut last.trailing);
		}
		self.children.push(node);
	}

	/// Top-level headings as `(index, level, title)` triples in document
	/// order. Headings without any text report an empty title.
	pub fn headings(&self) -> impl Iterator<Item = (usize, u8, &str)> {
		self.children.iter().enumerate().filter_map(|(index, node)| {
			let level = node.level()?;
			let title = crate::first_text(node).unwrap_or_default();
			Some((index, level, title))
		})
	}
}

/// Make sure the separator `gap` contains a blank line, keeping the line
/// ending style already present in it.
pub(crate) fn ensure_blank_line(gap: &mut String) {
	if gap.matches('\n').count() >= 2 {
		return;
	}
	let line_ending = if gap.contains("\r\n") { "\r\n" } else { "\n" };
	gap.clear();
	gap.push_str(line_ending);
	gap.push_str(line_ending);
}

/// Parse markdown text into a [`Document`].
///
/// GFM extensions and front matter are enabled. Markdown has no syntax
/// errors, so this only fails if the underlying parser reports a message
/// for a construct it cannot handle.
pub fn parse(content: impl AsRef<str>) -> CompdocResult<Document> {
	parse_with(content.as_ref(), &parse_options(true))
}

/// Parse markdown that will be spliced into another document. Front matter
/// is only valid at the start of a whole document, so a leading `---` here
/// is a thematic break.
pub fn parse_fragment(content: impl AsRef<str>) -> CompdocResult<Document> {
	parse_with(content.as_ref(), &parse_options(false))
}

fn parse_with(content: &str, options: &ParseOptions) -> CompdocResult<Document> {
	let root = to_mdast(content, options).map_err(|e| CompdocError::Markdown(e.to_string()))?;
	let blocks = root.children().map(Vec::as_slice).unwrap_or_default();

	let mut leading = String::new();
	let mut children: Vec<Node> = Vec::with_capacity(blocks.len());
	let mut cursor = 0;

	for block in blocks {
		let (start, end) = span_of(block).unwrap_or((cursor, cursor));
		let start = start.max(cursor);
		let gap = content.get(cursor..start).unwrap_or_default();
		match children.last_mut() {
			Some(previous) => previous.trailing.push_str(gap),
			None => leading.push_str(gap),
		}

		children.push(convert(block, content));
		cursor = end.max(start);
	}

	let rest = content.get(cursor..).unwrap_or_default();
	match children.last_mut() {
		Some(last) => last.trailing.push_str(rest),
		None => leading.push_str(rest),
	}

	tracing::trace!(blocks = children.len(), bytes = content.len(), "parsed markdown document");

	Ok(Document {
		leading,
		children,
		source: content.to_string(),
	})
}

fn parse_options(frontmatter: bool) -> ParseOptions {
	let mut options = ParseOptions::gfm();
	options.constructs.frontmatter = frontmatter;
	options
}

fn span_of(node: &mdast::Node) -> Option<(usize, usize)> {
	node.position()
		.map(|position| (position.start.offset, position.end.offset))
}

fn convert(node: &mdast::Node, content: &str) -> Node {
	let raw = span_of(node).and_then(|(start, end)| content.get(start..end));
	let (kind, value) = classify(node);
	let value = match kind {
		NodeKind::Html => value.or_else(|| raw.map(ToString::to_string)),
		_ => value,
	};
	let children = node
		.children()
		.map(|nodes| nodes.iter().map(|child| convert(child, content)).collect())
		.unwrap_or_default();

	Node {
		kind,
		children,
		raw: raw.map(ToString::to_string),
		value,
		trailing: String::new(),
	}
}

fn classify(node: &mdast::Node) -> (NodeKind, Option<String>) {
	match node {
		mdast::Node::Heading(heading) => {
			(
				NodeKind::Header {
					level: heading.depth,
				},
				None,
			)
		}
		mdast::Node::Paragraph(_) => (NodeKind::Paragraph, None),
		mdast::Node::Text(text) => (NodeKind::Str, Some(text.value.clone())),
		mdast::Node::Emphasis(_) => (NodeKind::Emphasis, None),
		mdast::Node::Strong(_) => (NodeKind::Strong, None),
		mdast::Node::Delete(_) => (NodeKind::Delete, None),
		mdast::Node::InlineCode(code) => (NodeKind::InlineCode, Some(code.value.clone())),
		mdast::Node::Break(_) => (NodeKind::Break, None),
		mdast::Node::Link(link) => {
			(
				NodeKind::Link {
					url: link.url.clone(),
					title: link.title.clone(),
				},
				None,
			)
		}
		mdast::Node::Image(image) => {
			(
				NodeKind::Image {
					url: image.url.clone(),
					alt: image.alt.clone(),
					title: image.title.clone(),
				},
				None,
			)
		}
		mdast::Node::LinkReference(reference) => {
			(
				NodeKind::LinkReference {
					label: reference
						.label
						.clone()
						.unwrap_or_else(|| reference.identifier.clone()),
				},
				None,
			)
		}
		mdast::Node::ImageReference(reference) => {
			(
				NodeKind::ImageReference {
					label: reference
						.label
						.clone()
						.unwrap_or_else(|| reference.identifier.clone()),
					alt: reference.alt.clone(),
				},
				None,
			)
		}
		mdast::Node::Code(code) => {
			(
				NodeKind::CodeBlock {
					lang: code.lang.clone(),
					meta: code.meta.clone(),
				},
				Some(code.value.clone()),
			)
		}
		mdast::Node::List(list) => {
			(
				NodeKind::List {
					ordered: list.ordered,
					start: list.start,
				},
				None,
			)
		}
		mdast::Node::ListItem(item) => {
			(
				NodeKind::ListItem {
					checked: item.checked,
				},
				None,
			)
		}
		mdast::Node::Blockquote(_) => (NodeKind::BlockQuote, None),
		mdast::Node::ThematicBreak(_) => (NodeKind::ThematicBreak, None),
		mdast::Node::Html(html) => (NodeKind::Html, Some(html.value.clone())),
		mdast::Node::Table(table) => {
			(
				NodeKind::Table {
					align: table.align.iter().map(convert_align).collect(),
				},
				None,
			)
		}
		mdast::Node::TableRow(_) => (NodeKind::TableRow, None),
		mdast::Node::TableCell(_) => (NodeKind::TableCell, None),
		mdast::Node::Definition(definition) => {
			(
				NodeKind::Definition {
					label: definition
						.label
						.clone()
						.unwrap_or_else(|| definition.identifier.clone()),
					url: definition.url.clone(),
					title: definition.title.clone(),
				},
				None,
			)
		}
		mdast::Node::FootnoteDefinition(definition) => {
			(
				NodeKind::FootnoteDefinition {
					label: definition
						.label
						.clone()
						.unwrap_or_else(|| definition.identifier.clone()),
				},
				None,
			)
		}
		mdast::Node::FootnoteReference(reference) => {
			(
				NodeKind::FootnoteReference {
					label: reference
						.label
						.clone()
						.unwrap_or_else(|| reference.identifier.clone()),
				},
				None,
			)
		}
		mdast::Node::Yaml(yaml) => {
			(
				NodeKind::FrontMatter {
					format: FrontMatterFormat::Yaml,
				},
				Some(yaml.value.clone()),
			)
		}
		mdast::Node::Toml(toml) => {
			(
				NodeKind::FrontMatter {
					format: FrontMatterFormat::Toml,
				},
				Some(toml.value.clone()),
			)
		}
		// MDX and math constructs are disabled in `parse_options`. Anything
		// else is kept verbatim as raw markup.
		_ => (NodeKind::Html, None),
	}
}

fn convert_align(align: &mdast::AlignKind) -> Align {
	match align {
		mdast::AlignKind::Left => Align::Left,
		mdast::AlignKind::Right => Align::Right,
		mdast::AlignKind::Center => Align::Center,
		mdast::AlignKind::None => Align::None,
	}
}
