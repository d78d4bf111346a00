use crate::{errors::GenericError, utils::error_chain_fmt};

#[derive(thiserror::Error)]
pub enum CartError {
    #[error("Items from a different restaurant cannot be added to this cart")]
    MixedRestaurants,
}

impl std::fmt::Debug for CartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<CartError> for GenericError {
    fn from(err: CartError) -> GenericError {
        GenericError::ValidationError(err.to_string())
    }
}
