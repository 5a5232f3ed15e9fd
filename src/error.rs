use thiserror::Error;

pub type Result<T> = std::result::Result<T, ListError>;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    #[error("{op} called on an empty list")]
    Empty { op: &'static str },
}

impl ListError {
    pub(crate) fn empty(op: &'static str) -> Self {
        ListError::Empty { op }
    }
}
