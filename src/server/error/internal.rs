use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Password or OTP hashing failed.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Failed to hash secret: {0}")]
    Hashing(String),

    /// A stored hash is not a valid PHC string.
    #[error("Stored hash for user {user_id} is malformed: {reason}")]
    MalformedHash {
        /// Owner of the malformed hash
        user_id: i32,
        /// Parser message
        reason: String,
    },

    /// A value read from the database does not match any known variant.
    #[error("Unknown {kind} '{value}' stored in database")]
    UnknownStoredValue {
        /// Name of the enumerated value, e.g. `event status`
        kind: &'static str,
        /// The stored value
        value: String,
    },
}
