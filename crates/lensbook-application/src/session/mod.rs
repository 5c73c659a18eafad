//! Session orchestration helpers.

mod persist;

pub use persist::SessionWriter;
