//! Types shared between the audit pipeline and its front ends.

pub mod config;
pub mod inventory;
pub mod record;
