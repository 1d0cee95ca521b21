//! Admin API: roster listing and export downloads, behind the admin gate.

pub mod handlers;
pub mod routes;
