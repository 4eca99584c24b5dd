//! Core module: Queue dan SyncQueue
//!
//! Prinsip desain:
//! - Satu buffer: elemen hidup selalu di `buf[off..]`, tidak ada wrap-around
//! - Reclaim dulu, alokasi belakangan: reset / slide sebelum realokasi
//! - No leak: elemen yang dihapus di-drop saat itu juga

mod queue;
mod sync_queue;

pub use queue::Queue;
pub use sync_queue::SyncQueue;
