use adisyon_core::ParseStatusError;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Malformed or out-of-range input: bad quantity, price, status, date or
    /// payment method.
    #[error("{0}")]
    InvalidArgument(String),

    /// A referenced table, order, menu item or order item does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The operation violates a state invariant, e.g. mutating a closed
    /// order.
    #[error("{0}")]
    Conflict(String),

    /// A stored enum column failed to decode. The schema's check constraints
    /// make this unreachable short of writes from outside the engine.
    #[error("corrupt stored value: {0}")]
    Decode(#[from] ParseStatusError),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}
