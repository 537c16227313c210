//! # Mermaid Refiner Core
//!
//! Line-oriented clean-up for directories of Markdown notes.
//!
//! ## Pipeline
//!
//! ```text
//! *.md file
//!     │
//!     ├──> Blank detection (single heading that repeats the file name → skip)
//!     │
//!     ├──> Math delimiter substitutions (\( \) \$ → $, spacing fixes)
//!     │
//!     ├──> Fence scan
//!     │    ├─> Track ```mermaid blocks
//!     │    ├─> Remember the last `-->` line of each block
//!     │    └─> Schedule a closing fence right after it when missing
//!     │
//!     └──> Apply insertions (highest index first) and replace the file
//! ```
//!
//! ## Example
//!
//! ```rust
//! use mermaid_refiner_core::{Refiner, RefinerConfig};
//!
//! let refiner = Refiner::new(RefinerConfig::default()).unwrap();
//! let (text, inserted) = refiner.refine_text("```mermaid\nA --> B\n");
//! assert_eq!(text, "```mermaid\nA --> B\n```\n");
//! assert_eq!(inserted, 1);
//! ```

mod blank;
mod config;
mod document;
mod error;
mod fence;
mod normalize;
mod processor;
mod substitute;

pub use blank::{is_blank_document, is_blank_file, BlankDetector};
pub use config::RefinerConfig;
pub use document::{join_lines, split_lines, strip_line_ending};
pub use error::{RefinerError, Result};
pub use fence::{
    apply_insertions, plan_insertions, repair_lines, BlockScan, FenceSyntax, Insertion,
};
pub use normalize::normalize_title;
pub use processor::{FileFailure, FileOutcome, Refiner, RunSummary};
pub use substitute::normalize_math_delimiters;
