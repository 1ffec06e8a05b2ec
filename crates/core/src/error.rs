use thiserror::Error;

use crate::model::ItemError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Item(#[from] ItemError),
}
