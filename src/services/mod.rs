//! Service layer for Unibridge.
//!
//! Logic that sits between handlers and the query modules:
//! - Events (upcoming/past calendar split)
//! - Search (site-wide catalog search)
//! - Catalog (slug allocation, course placement rules)
//! - Validation (required fields, email, slugs)

pub mod catalog;
mod events;
mod search;
pub mod validation;

pub use events::{partition_events, split_point, split_point_linear, EventService, EventsOverview};
pub use search::{SearchResults, SearchService};
