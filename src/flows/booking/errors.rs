use crate::{errors::GenericError, utils::error_chain_fmt};

#[derive(thiserror::Error)]
pub enum BookingFlowError {
    #[error("{0}")]
    ValidationError(String),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for BookingFlowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<BookingFlowError> for GenericError {
    fn from(err: BookingFlowError) -> GenericError {
        match err {
            BookingFlowError::ValidationError(message) => GenericError::ValidationError(message),
            BookingFlowError::UnexpectedError(error) => GenericError::UnexpectedError(error),
        }
    }
}
