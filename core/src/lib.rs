//! # Cloudscout Core
//!
//! The per-domain probing and attribution pipeline.
//!
//! * **[`resolver`]**: domain → IPv4, with one level of CNAME fallback.
//! * **[`prober`]**: HTTPS/HTTP reachability via HEAD then GET.
//! * **[`cloud`]**: attributes an address to AWS, GCP or Azure.
//! * **[`ports`]**: TCP connect scan over the named ports of a domain.
//! * **[`smtp`]**: checks the first mail exchanger for a `220` greeting.
//! * **[`audit`]**: sequences the stages above for each domain.
//!
//! Every stage absorbs its own failures into the result record; nothing here
//! aborts a run.

pub mod audit;
pub mod cloud;
pub mod dns;
pub mod ports;
pub mod prober;
pub mod progress;
pub mod resolver;
pub mod smtp;
