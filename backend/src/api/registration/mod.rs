//! Registration API: the public form-submission endpoint.

pub mod handlers;
pub mod routes;
