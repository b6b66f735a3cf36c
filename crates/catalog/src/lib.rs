//! Derived views over a snapshot of the course catalog.
//!
//! Every function here is pure: it reads the records it is given and
//! returns new values. Callers fetch a fresh snapshot from the course store
//! after any mutation instead of patching previously computed views.

pub mod aggregate;
pub mod enrollment;
pub mod filter;
pub mod rank;
pub mod views;

pub use aggregate::{AsCourse, Decorate, average_rating, decorate_all};
pub use enrollment::{is_enrolled, user_rating};
pub use filter::{filter_by_category, search};
pub use rank::{FEATURED_LIMIT, TRENDING_LIMIT, featured, rank_by_rating, trending};
