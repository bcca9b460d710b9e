use thiserror::Error;

/// Errors raised by a [`Delivery`](crate::Delivery) implementation.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// A message could not be delivered to the remote endpoint.
    #[error("Send failed: {0}")]
    SendFailed(String),

    /// The message or interaction being answered no longer exists.
    #[error("Target not found: {0}")]
    NotFound(String),
}
