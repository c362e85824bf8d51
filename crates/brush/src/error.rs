use brush_config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrushError {
    #[error("Unknown setting id: {0}")]
    UnknownSetting(usize),
    #[error("Unknown input id: {0}")]
    UnknownInput(usize),
    #[error("Invalid engine config: {0}")]
    Config(#[from] ConfigError),
}
