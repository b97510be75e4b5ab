//! Payment return page: renders the post-payment confirmation page and
//! hands the user back to the native app through a deep link.

pub mod config;
pub mod handoff;
pub mod page;
pub mod routes;
pub mod state;
pub mod status;
pub mod target;
