//! I/O helpers: storage backends, configuration, and UI selection state.

pub mod config;
pub mod selection;
pub mod storage;
