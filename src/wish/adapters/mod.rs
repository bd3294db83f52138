//! Adapter implementations for wish ports.

pub mod memory;
pub mod postgres;

mod ranking;
