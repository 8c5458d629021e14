//! Output generation for a finished run.
//!
//! # Submodules
//!
//! - [`table`]: renders a [`HeadlineTable`](crate::models::HeadlineTable) for the console
//! - [`json`]: writes a [`HeadlineReport`](crate::models::HeadlineReport) for later use
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── AAPL.json
//!     └── MSFT.json
//! ```

pub mod json;
pub mod table;
