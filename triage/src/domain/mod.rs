//! Domain layer
//!
//! Contains pure business types with no I/O.
//! - `entities`: tickets, agent outputs and opinions
//! - `ports`: the analyzer contract implemented by adapters

pub mod entities;
pub mod ports;
