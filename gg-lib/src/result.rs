use crate::error::GgError;

pub type GgResult<T> = std::result::Result<T, GgError>;
