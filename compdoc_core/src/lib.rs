//! `compdoc_core` is the engine behind [compdoc](https://github.com/compdoc/compdoc). It renders markdown documentation for UI components from structured metadata and merges the result into one named section of an existing markdown document, leaving every other section exactly as it was.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Component metadata (json / yaml / toml)
//!   → Renderer (metadata → markdown fragment)
//!   → Parser (existing document → Document tree, every node keeps its source text)
//!   → Section locator (first heading whose text matches the title)
//!   → Splicer (section body replaced by the fragment's blocks)
//!   → Serializer (untouched nodes written verbatim, new nodes rendered)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from `compdoc.toml`.
//! - [`render`]: Component metadata and the [`FragmentRenderer`] trait.
//!
//! ## Key Types
//!
//! - [`Document`]: A parsed markdown document of ordered top-level blocks.
//! - [`Node`] / [`NodeKind`]: One structural unit of markdown and its closed set of kinds.
//! - [`Section`]: A located heading and the extent of the blocks under it.
//! - [`MergeRequest`]: Inputs of a single merge.
//!
//! ## Quick Start
//!
//! ```rust
//! use compdoc_core::merge;
//!
//! let readme = "# Checkbox\n\n## API\n\nout of date\n\n## License\n\nMIT\n";
//! let fragment = "### props\n\n- `model`\n";
//!
//! let merged = merge(Some(readme), fragment, Some("API")).unwrap();
//! assert_eq!(
//! 	merged,
//! 	"# Checkbox\n\n## API\n\n### props\n\n- `model`\n\n## License\n\nMIT\n"
//! );
//! ```

pub use config::CompdocConfig;
pub use error::*;
pub use merge::*;
pub use render::ComponentMetadata;
pub use render::ComponentSource;
pub use render::FragmentRenderer;
pub use render::MetadataFormat;
pub use render::MetadataRenderer;
pub use render::RenderOptions;
pub use section::*;
pub use serializer::*;
pub use tree::*;

pub mod config;
#[allow(unused_assignments)]
mod error;
mod merge;
pub mod render;
mod section;
mod serializer;
mod tree;

#[cfg(test)]
mod __fixtures;
