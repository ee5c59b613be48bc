use thiserror::Error;

use crate::request::MAX_EXPERIENCE_YEARS;

pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a submission is skipped before it reaches the network
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("Search query is empty")]
    EmptyQuery,

    #[error("Experience must be between 0 and {max} years, got {0}", max = MAX_EXPERIENCE_YEARS)]
    ExperienceOutOfRange(u32),

    #[error("A {0} request is already in progress")]
    InFlight(String),

    #[error("Page {requested} is out of range (1..={last})")]
    PageOutOfRange { requested: u32, last: u32 },

    #[error("There is no previous search")]
    NoPreviousSearch,
}
