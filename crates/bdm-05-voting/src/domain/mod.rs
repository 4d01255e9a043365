pub mod errors;
pub mod tally;
pub mod vote;

pub use errors::VoteError;
pub use tally::{TallyResult, Votes};
pub use vote::Vote;
