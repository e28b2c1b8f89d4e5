//! Visitor-facing surface of Edvise.
//!
//! The public side is read-only over the record store plus two outbound
//! email flows. The listing fetches once and pages locally; the detail view
//! renders fields already in hand, never a second fetch.

mod listing;
mod submit;

pub use listing::{CollegeListing, PAGE_SIZE};
pub use submit::Submissions;
