//! worddrill-sources — Where vocabulary sheets come from.
//!
//! Implements `DatasetSource` for published sheet exports over HTTP and for
//! local CSV files, plus the configuration that names them.

pub mod config;
pub mod file;
pub mod http;
pub mod loader;
pub mod mock;

pub use config::{create_source, load_config, load_config_from, DatasetConfig, WorddrillConfig};
pub use file::FileSource;
pub use http::HttpSource;
pub use loader::{reload, ReloadOutcome};
pub use mock::MockSource;
