//! API surface shared with clients.

pub mod routes;
