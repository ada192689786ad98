//! Models shared by the browser application and the server.
//!
//! Everything here is plain serde data: the `model` module holds the domain
//! entities, `requests` holds the JSON bodies exchanged over the REST API.

pub mod model;
pub mod requests;
