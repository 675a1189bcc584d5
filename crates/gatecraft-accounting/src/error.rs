/// Errors raised constructing an accountant; everyday operation
/// (estimating, recording, checking budget) never fails
#[derive(Debug, thiserror::Error)]
pub enum AccountingError {
    /// A budget limit must be a non-negative amount
    #[error("budget limit must be non-negative, got {0}")]
    NegativeBudget(f64),
}
