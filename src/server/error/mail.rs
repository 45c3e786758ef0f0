use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailError {
    /// Sender or recipient is not a valid mailbox.
    #[error("Invalid mail address '{address}': {source}")]
    Address {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    /// The message could not be assembled.
    #[error(transparent)]
    Build(#[from] lettre::error::Error),

    /// The SMTP relay rejected the message or could not be reached.
    #[error(transparent)]
    Transport(#[from] lettre::transport::smtp::Error),

    /// Used by test doubles to simulate a delivery failure.
    #[error("Mail delivery failed: {0}")]
    Delivery(String),
}
