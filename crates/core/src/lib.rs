//! Domain core for the awards administration dashboard.
//!
//! Holds everything the dashboard pages share regardless of transport:
//! the entity catalog, record and draft types, the search filter, the
//! table renderer, the form modal state machine, and the generic
//! [`list_view::ListView`] workflow that drives one entity page against an
//! [`gateway::EntityGateway`].

pub mod catalog;
pub mod dashboard;
pub mod draft;
pub mod entity;
pub mod error;
pub mod gateway;
pub mod list_view;
pub mod modal;
pub mod record;
pub mod search;
pub mod table;
pub mod view;
