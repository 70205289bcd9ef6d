//! DataFrame utilities for annotation tables.
//!
//! Every function returns a new frame unless documented as in-place
//! ([`blank_empty_strings`], [`create_missing_columns`]). Missing cells are
//! recognized through [`annot_common::is_missing`].

pub mod columns;
pub mod dedupe;
pub mod error;
pub mod join;
pub mod merge;
pub mod missing;
mod util;

pub use columns::{add_column_prefix, first_value_or};
pub use dedupe::{DEFAULT_SEPARATOR, dedupe_join, dedupe_join_with, group_join_unique, unique_list};
pub use error::{FrameError, JoinSide, Result};
pub use join::{RIGHT_SUFFIX, left_join_preserve_index};
pub use merge::merge_fill;
pub use missing::{blank_empty_strings, create_missing_columns, normalize_missing};
