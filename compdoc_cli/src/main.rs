use std::io::IsTerminal;
use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use compdoc_cli::CompdocCli;
use compdoc_cli::Input;
use compdoc_cli::Options;
use compdoc_cli::Outcome;
use compdoc_cli::logging;
use compdoc_core::CompdocError;
use compdoc_core::CompdocResult;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = CompdocCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	logging::init(args.verbose, use_color);

	if let Err(e) = run(&args) {
		let code = if e.is_usage_error() { 1 } else { 2 };
		let report: miette::Report = e.into();
		eprintln!("{report:?}");
		process::exit(code);
	}
}

fn resolve_root(args: &CompdocCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn run(args: &CompdocCli) -> CompdocResult<()> {
	let root = resolve_root(args);
	let options = Options::from_cli(args, &root)?;

	let stdin = std::io::stdin();
	if matches!(options.input, Input::Stdin(_)) && stdin.is_terminal() {
		return Err(CompdocError::MissingInput);
	}

	let outcome = {
		let mut stdout = std::io::stdout().lock();
		compdoc_cli::run(&options, &mut stdin.lock(), &mut stdout)?
	};

	match outcome {
		Outcome::Printed => {}
		Outcome::Written { path, changed } => {
			let path = make_relative(&path, &root);
			if changed {
				println!("{} {path}", colored!("Updated", green));
			} else {
				println!("{path} is already up to date");
			}
		}
		Outcome::Preview {
			path,
			current,
			expected,
		} => {
			let path = make_relative(&path, &root);
			if current == expected {
				println!("{path} is already up to date");
			} else {
				println!("{} {path}", colored!("Would update", bold));
				print_diff(&current, &expected);
			}
		}
	}

	Ok(())
}

/// Print a line diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				print!("{}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				print!("{}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				print!(" {change}");
			}
		}
		if change.missing_newline() {
			println!();
		}
	}
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
