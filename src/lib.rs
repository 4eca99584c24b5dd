//! offq - Resizable FIFO Queue dengan read offset
//!
//! Arsitektur:
//! - `Queue`: satu buffer kontigu, read offset yang bergeser, growth amortized O(1)
//! - `SyncQueue`: `Queue` + Mutex + Condvar untuk producer/consumer antar thread
//! - Slot yang sudah dikonsumsi langsung di-drop, tidak ada elemen mati yang tertahan

pub mod core;

pub use crate::core::{Queue, SyncQueue};
