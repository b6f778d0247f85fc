use crate::Align;
use crate::Document;
use crate::FrontMatterFormat;
use crate::Node;
use crate::NodeKind;

/// Serialize a document back to markdown.
///
/// Untouched nodes are written exactly as they were parsed, together with the
/// separators that surrounded them, so `serialize(&parse(text)?)` reproduces
/// `text` byte for byte.
pub fn serialize(document: &Document) -> String {
	let children = document.children();
	let mut output = String::with_capacity(document.source().len());
	output.push_str(&document.leading);

	for (index, node) in children.iter().enumerate() {
		output.push_str(&serialize_node(node));
		let is_last = index + 1 == children.len();
		if is_last || node.trailing.contains('\n') {
			output.push_str(&node.trailing);
		} else {
			// Synthesized blocks without a separator would run into the next
			// block.
			output.push_str("\n\n");
		}
	}

	output
}

/// Serialize a single node. Nodes that still carry their source text are
/// emitted verbatim, anything else is rendered from its structure.
pub fn serialize_node(node: &Node) -> String {
	emit(node, true)
}

/// Emit `node`, using its source text only when `verbatim` is set. Blocks
/// nested in a container carry the container's prefixes in their source
/// text, so a container rendered from structure renders its whole subtree.
fn emit(node: &Node, verbatim: bool) -> String {
	match node.raw() {
		Some(raw) if verbatim => raw.to_string(),
		_ => render(node, verbatim),
	}
}

fn render(node: &Node, verbatim: bool) -> String {
	let value = node.value().unwrap_or_default();
	let inline = || render_inline(node.children(), verbatim);

	match node.kind() {
		NodeKind::Header { level } => {
			let marker = "#".repeat(usize::from((*level).clamp(1, 6)));
			let title = escape_closing_hash(inline());
			if title.is_empty() {
				marker
			} else {
				format!("{marker} {title}")
			}
		}
		NodeKind::Paragraph | NodeKind::TableCell => inline(),
		NodeKind::Str => escape_text(value),
		NodeKind::Emphasis => format!("*{}*", inline()),
		NodeKind::Strong => format!("**{}**", inline()),
		NodeKind::Delete => format!("~~{}~~", inline()),
		NodeKind::InlineCode => code_span(value),
		NodeKind::Break => "\\\n".to_string(),
		NodeKind::Link { url, title } => {
			format!(
				"[{}]({}{})",
				inline(),
				destination(url),
				title_suffix(title.as_deref())
			)
		}
		NodeKind::Image { url, alt, title } => {
			format!(
				"![{}]({}{})",
				escape_text(alt),
				destination(url),
				title_suffix(title.as_deref())
			)
		}
		NodeKind::LinkReference { label } => format!("[{}][{label}]", inline()),
		NodeKind::ImageReference { label, alt } => format!("![{}][{label}]", escape_text(alt)),
		NodeKind::FootnoteReference { label } => format!("[^{label}]"),
		NodeKind::CodeBlock { lang, meta } => {
			let fence = "`".repeat(longest_run(value, '`').max(2) + 1);
			let info = match (lang, meta) {
				(Some(lang), Some(meta)) => format!("{lang} {meta}"),
				(Some(lang), None) => lang.clone(),
				(None, _) => String::new(),
			};
			if value.is_empty() {
				format!("{fence}{info}\n{fence}")
			} else {
				format!("{fence}{info}\n{value}\n{fence}")
			}
		}
		NodeKind::List { ordered, start } => {
			render_list(node, *ordered, start.unwrap_or(1), verbatim)
		}
		NodeKind::ListItem { .. } => render_list_item(node, "-"),
		NodeKind::BlockQuote => prefix_lines(&render_blocks(node.children()), "> ", ">"),
		NodeKind::ThematicBreak => "***".to_string(),
		NodeKind::Html => value.to_string(),
		NodeKind::Table { align } => render_table(node, align, verbatim),
		NodeKind::TableRow => render_row(node, verbatim),
		NodeKind::Definition { label, url, title } => {
			format!(
				"[{label}]: {}{}",
				destination(url),
				title_suffix(title.as_deref())
			)
		}
		NodeKind::FootnoteDefinition { label } => {
			let content = render_blocks(node.children());
			format!("[^{label}]: {}", indent_continuation(&content, "    "))
		}
		NodeKind::FrontMatter { format } => {
			let fence = match format {
				FrontMatterFormat::Yaml => "---",
				FrontMatterFormat::Toml => "+++",
			};
			format!("{fence}\n{value}\n{fence}")
		}
	}
}

fn render_inline(nodes: &[Node], verbatim: bool) -> String {
	nodes.iter().map(|node| emit(node, verbatim)).collect()
}

/// Render the blocks of a container from structure.
fn render_blocks(nodes: &[Node]) -> String {
	nodes
		.iter()
		.map(|node| emit(node, false))
		.collect::<Vec<_>>()
		.join("\n\n")
}

fn render_list(node: &Node, ordered: bool, start: u32, verbatim: bool) -> String {
	let loose = node
		.children()
		.iter()
		.any(|item| item.children().len() > 1);
	let separator = if loose { "\n\n" } else { "\n" };

	node.children()
		.iter()
		.enumerate()
		.map(|(position, item)| {
			let marker = if ordered {
				format!("{}.", start as usize + position)
			} else {
				"-".to_string()
			};
			match item.raw() {
				Some(raw) if verbatim => raw.to_string(),
				_ => render_list_item(item, &marker),
			}
		})
		.collect::<Vec<_>>()
		.join(separator)
}

fn render_list_item(item: &Node, marker: &str) -> String {
	let task = match item.kind() {
		NodeKind::ListItem {
			checked: Some(true),
		} => "[x] ",
		NodeKind::ListItem {
			checked: Some(false),
		} => "[ ] ",
		_ => "",
	};
	let content = render_blocks(item.children());
	let indent = " ".repeat(marker.len() + 1);

	format!("{marker} {task}{}", indent_continuation(&content, &indent))
		.trim_end()
		.to_string()
}

fn render_table(node: &Node, align: &[Align], verbatim: bool) -> String {
	let mut lines = Vec::with_capacity(node.children().len() + 1);

	for (index, row) in node.children().iter().enumerate() {
		lines.push(emit(row, verbatim));
		if index == 0 {
			let columns = row.children().len().max(align.len());
			let delimiters: Vec<&str> = (0..columns)
				.map(|column| {
					match align.get(column).copied().unwrap_or(Align::None) {
						Align::None => "---",
						Align::Left => ":--",
						Align::Right => "--:",
						Align::Center => ":-:",
					}
				})
				.collect();
			lines.push(format!("| {} |", delimiters.join(" | ")));
		}
	}

	lines.join("\n")
}

fn render_row(row: &Node, verbatim: bool) -> String {
	let cells: Vec<String> = row
		.children()
		.iter()
		.map(|cell| emit(cell, verbatim))
		.collect();
	format!("| {} |", cells.join(" | "))
}

/// Prefix every line of `content`, using `empty` for blank lines.
fn prefix_lines(content: &str, prefix: &str, empty: &str) -> String {
	content
		.lines()
		.map(|line| {
			if line.is_empty() {
				empty.to_string()
			} else {
				format!("{prefix}{line}")
			}
		})
		.collect::<Vec<_>>()
		.join("\n")
}

/// Indent all lines but the first, leaving blank lines empty.
fn indent_continuation(content: &str, indent: &str) -> String {
	let mut lines = content.lines();
	let Some(first) = lines.next() else {
		return String::new();
	};
	let mut result = first.to_string();
	for line in lines {
		result.push('\n');
		if !line.is_empty() {
			result.push_str(indent);
			result.push_str(line);
		}
	}
	result
}

fn longest_run(text: &str, target: char) -> usize {
	let mut longest = 0;
	let mut current = 0;
	for character in text.chars() {
		if character == target {
			current += 1;
			longest = longest.max(current);
		} else {
			current = 0;
		}
	}
	longest
}

fn code_span(value: &str) -> String {
	let fence = "`".repeat(longest_run(value, '`') + 1);
	if value.starts_with('`') || value.ends_with('`') {
		format!("{fence} {value} {fence}")
	} else {
		format!("{fence}{value}{fence}")
	}
}

fn destination(url: &str) -> String {
	if url.is_empty() || url.contains([' ', '(', ')', '<', '>']) {
		format!("<{}>", url.replace('<', "%3C").replace('>', "%3E"))
	} else {
		url.to_string()
	}
}

fn title_suffix(title: Option<&str>) -> String {
	title.map_or_else(String::new, |title| {
		format!(" \"{}\"", title.replace('"', "\\\""))
	})
}

/// Escape characters that would otherwise be read as markdown syntax.
fn escape_text(text: &str) -> String {
	text.split('\n')
		.map(escape_line)
		.collect::<Vec<_>>()
		.join("\n")
}

fn escape_line(line: &str) -> String {
	let mut escaped = String::with_capacity(line.len());
	// `1.` or `1)` at the start of a line opens an ordered list.
	let digits = line.bytes().take_while(u8::is_ascii_digit).count();
	let ordered_marker = digits > 0 && matches!(line.as_bytes().get(digits), Some(b'.' | b')'));

	for (index, character) in line.char_indices() {
		let special = matches!(
			character,
			'\\' | '`' | '*' | '_' | '[' | ']' | '<' | '|' | '~' | '&'
		) || (index == 0 && matches!(character, '#' | '>' | '+' | '-' | '='))
			|| (ordered_marker && index == digits);
		if special {
			escaped.push('\\');
		}
		escaped.push(character);
	}

	escaped
}

/// A heading title ending in ` #` would be read as a closing sequence.
fn escape_closing_hash(mut title: String) -> String {
	if title.ends_with('#') && !title.ends_with("\\#") {
		title.insert(title.len() - 1, '\\');
	}
	title
}
