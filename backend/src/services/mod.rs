//! Module for core business logic services.
//!
//! This module encapsulates the services that orchestrate the spreadsheet
//! store adapter: the registration workflow and the admin roster/export
//! workflow.

pub mod registration;
pub mod roster;
