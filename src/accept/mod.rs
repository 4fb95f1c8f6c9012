//! Accept header parsing.
//!
//! A header such as `application/xml;q=0.5, application/json` is split on
//! commas into [`AcceptClause`]s, which are then bucketed into
//! [`PriorityGroup`]s ordered from most to least preferred. Clauses that share
//! a priority keep the order in which the client listed them.

pub mod clause;
pub mod group;

pub use clause::{AcceptClause, DEFAULT_PRIORITY};
pub use group::{PriorityGroup, clauses_in_order, group_by_priority};
