use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Log file error: {0}")]
    Io(#[from] std::io::Error),
}
