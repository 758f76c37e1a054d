//! Discovery and parsing of `.doclintrc` configuration files.
//!
//! The config carries the analyzer settings, the file patterns checked for
//! headers, the default manifest path and the raw `lint` section, which the
//! linter interprets.

mod config;
mod error;
mod loader;

pub use config::{expand_braces, DocLintConfig, FilesConfig, COMPANY_NAME_TOKEN};
pub use error::{ConfigError, Result};
pub use loader::{find_config, load_config, load_config_from_str, CONFIG_FILES};
