//! # computo-format
//!
//! Boundary layer between text and the computo engine.
//!
//! Includes:
//! - `DD/MM/YYYY` parsing and formatting ([`dates`])
//! - Case files in JSON, YAML, or TOML ([`case_file`])
//! - `computo.toml` default settings ([`settings`])
//! - Result formatter (JSON, Table, Markdown, Summary)

pub mod case_file;
pub mod dates;
pub mod formatter;
pub mod settings;

pub use case_file::{CaseFile, CaseFormat, RawCause};
pub use dates::{format_dmy, format_dmy_opt, parse_dmy};
pub use formatter::{format_computation, format_proposal, OutputFormat};
pub use settings::{load_settings, load_settings_or_default, parse_settings, SETTINGS_FILE};
