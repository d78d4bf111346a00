use crate::{errors::GenericError, utils::error_chain_fmt};

#[derive(thiserror::Error)]
pub enum PaymentFlowError {
    #[error("{0}")]
    ValidationError(String),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for PaymentFlowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<PaymentFlowError> for GenericError {
    fn from(err: PaymentFlowError) -> GenericError {
        match err {
            PaymentFlowError::ValidationError(message) => GenericError::ValidationError(message),
            PaymentFlowError::UnexpectedError(error) => GenericError::UnexpectedError(error),
        }
    }
}
