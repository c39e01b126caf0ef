#[derive(thiserror::Error, Debug)]
pub enum RouletteError {
    #[error("invalid outcome {0}: expected an integer in 0..=36")]
    InvalidOutcome(i64),
    #[error("invalid threshold for {key}: {value:?} is not an integer")]
    InvalidThreshold { key: String, value: String },
    #[error("unknown category kind: {0}")]
    UnknownCategory(String),
    #[error("invalid thresholds config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type RouletteResult<T> = Result<T, RouletteError>;
