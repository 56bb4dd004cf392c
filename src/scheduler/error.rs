use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("cannot aggregate a result with no processes")]
    EmptyResult,
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;
