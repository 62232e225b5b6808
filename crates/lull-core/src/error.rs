use thiserror::Error;

/// Errors surfaced by [`Composition`](crate::runtime::Composition).
#[derive(Debug, Error)]
pub enum ComposeError {
    /// State writes kept invalidating the composition past the pass limit.
    #[error("composition did not settle after {0} render passes")]
    Unsettled(usize),
}
