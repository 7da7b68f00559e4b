//! CLI error types.

use dw_config::ConfigError;
use dw_sink::SinkError;
use dw_translator::TranslateError;
use dw_tree::TreeError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Template(#[from] SinkError),

    #[error("{0}")]
    Translate(#[from] TranslateError),

    #[error("{0}")]
    Logging(String),
}
