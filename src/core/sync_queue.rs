//! SyncQueue: Queue + Mutex + Condvar untuk producer/consumer antar thread
//!
//! Semua akses ke queue di dalamnya lewat satu `parking_lot::Mutex`.
//! Consumer yang memanggil `pop` pada queue kosong di-park pada `Condvar`
//! yang terikat ke mutex yang sama, dan dibangunkan oleh `push`, `signal`
//! atau `broadcast`.

use parking_lot::{Condvar, Mutex, MutexGuard};
use tracing::trace;

use super::Queue;

/// Blocking FIFO queue yang aman dipakai dari banyak thread
///
/// `pop` menunggu **satu kali** saat queue kosong. Jika thread dibangunkan
/// tanpa data (lewat [`signal`](Self::signal) / [`broadcast`](Self::broadcast),
/// atau consumer lain lebih dulu mengambil elemennya), `pop` tetap return
/// dengan `T::default()`. Gunakan [`pop_checked`](Self::pop_checked) jika
/// caller perlu membedakan kedua kasus itu.
#[derive(Debug)]
pub struct SyncQueue<T> {
    queue: Mutex<Queue<T>>,
    cond: Condvar,
}

impl<T> Default for SyncQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Queue<T>> for SyncQueue<T> {
    fn from(queue: Queue<T>) -> Self {
        Self {
            queue: Mutex::new(queue),
            cond: Condvar::new(),
        }
    }
}

impl<T> SyncQueue<T> {
    /// Membuat SyncQueue kosong
    pub fn new() -> Self {
        Self::from(Queue::new())
    }

    /// Membuat SyncQueue kosong dengan kapasitas awal `capacity`
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from(Queue::with_capacity(capacity))
    }

    /// Akses langsung ke queue di dalamnya, tanpa lock.
    ///
    /// `&mut self` menjamin tidak ada thread lain yang memegang SyncQueue
    /// ini, jadi lock tidak diperlukan. Untuk akses batch dari konteks
    /// bersama (`&self`), gunakan [`lock`](Self::lock).
    pub fn queue(&mut self) -> &mut Queue<T> {
        self.queue.get_mut()
    }

    /// Mengambil lock dan mengembalikan guard atas queue di dalamnya.
    ///
    /// Selama guard hidup, semua operasi SyncQueue lain akan menunggu.
    /// Push lewat guard tidak membangunkan consumer; panggil
    /// [`signal`](Self::signal) atau [`broadcast`](Self::broadcast) setelah
    /// guard di-drop jika perlu.
    pub fn lock(&self) -> MutexGuard<'_, Queue<T>> {
        self.queue.lock()
    }

    /// Push elemen ke tail dan bangunkan satu consumer
    pub fn push(&self, e: T) {
        let mut queue = self.queue.lock();
        queue.push(e);
        self.cond.notify_one();
    }

    /// Membangunkan satu consumer yang sedang menunggu, tanpa data
    pub fn signal(&self) {
        self.cond.notify_one();
    }

    /// Membangunkan semua consumer yang sedang menunggu
    pub fn broadcast(&self) {
        self.cond.notify_all();
    }

    /// Jumlah elemen dalam queue
    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    /// Cek apakah queue kosong
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Mengosongkan queue. Consumer yang sedang menunggu tetap menunggu.
    pub fn reset(&self) {
        self.queue.lock().reset();
    }

    /// Melepas wrapper dan mengembalikan queue di dalamnya
    pub fn into_inner(self) -> Queue<T> {
        self.queue.into_inner()
    }
}

impl<T: Default> SyncQueue<T> {
    /// Pop elemen dari front, menunggu satu kali jika queue kosong.
    ///
    /// Flag found/not-found dibuang: `T::default()` bisa berarti elemen asli
    /// atau wakeup tanpa data. Lihat [`pop_checked`](Self::pop_checked).
    pub fn pop(&self) -> T {
        self.pop_checked().unwrap_or_default()
    }

    /// Seperti [`pop`](Self::pop), tapi `None` jika setelah menunggu queue
    /// masih kosong.
    pub fn pop_checked(&self) -> Option<T> {
        let mut queue = self.queue.lock();

        if queue.is_empty() {
            trace!("sync queue empty, parking consumer");
            self.cond.wait(&mut queue);
        }

        let e = queue.pop();
        if e.is_none() {
            trace!("consumer woke up but sync queue is still empty");
        }
        e
    }

    /// Pop tanpa menunggu. `None` jika queue kosong.
    pub fn try_pop(&self) -> Option<T> {
        self.queue.lock().pop()
    }
}
