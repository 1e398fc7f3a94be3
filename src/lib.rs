// ABOUTME: Library module for the soapbox slide compiler.
// ABOUTME: Contains segmentation, classification, transforms, and deck assembly.

// Reexport modules
pub mod assemble;
pub mod classify;
pub mod config;
pub mod dom;
pub mod downloads;
pub mod errors;
pub mod markdown;
pub mod options;
pub mod sections;
pub mod slide;
pub mod transform;
pub mod utils;

// Reexport common types and functions
pub use assemble::{assemble, CompiledDeck, Compiler, TocEntry};
pub use classify::{classify, ClassifiedSlide, RenderOptions, SectionCounter};
pub use config::Config;
pub use downloads::{DownloadEntry, Downloads};
pub use errors::{DeckError, Result};
pub use markdown::{ComrakRenderer, MarkdownRenderer};
pub use options::parse_options;
pub use slide::{segment, Slide};
