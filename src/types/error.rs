use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("{0}")]
    Generic(String),
    #[error("invalid schedule path: {0}")]
    InvalidPath(String),
    #[error("{0}: {1}")]
    Context(String, #[source] Box<SchedulerError>),
    #[error(transparent)]
    Store(#[from] heed::Error),
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

impl From<String> for SchedulerError {
    fn from(s: String) -> Self {
        SchedulerError::Generic(s)
    }
}

impl From<&str> for SchedulerError {
    fn from(s: &str) -> Self {
        SchedulerError::Generic(s.to_owned())
    }
}

/// Prefix an error with the operation that failed. Chained contexts read
/// outer cause first when walking `source()`.
pub trait ResultExt<T> {
    fn context(self, message: &str) -> Result<T, SchedulerError>;
}

impl<T, E: Into<SchedulerError>> ResultExt<T> for Result<T, E> {
    fn context(self, message: &str) -> Result<T, SchedulerError> {
        self.map_err(|e| SchedulerError::Context(message.to_owned(), Box::new(e.into())))
    }
}
