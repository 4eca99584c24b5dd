//! Resizable FIFO Queue dengan satu buffer kontigu dan read offset
//!
//! Elemen hidup selalu berada di `buf[off..]`. Write di `buf.len()`,
//! read di `buf[off]`. Slot sebelum `off` berisi `T::default()`: nilai
//! aslinya sudah di-move keluar (pop) atau di-drop (skip) saat dihapus,
//! jadi queue tidak pernah menahan elemen yang sudah mati.

use std::mem;
use std::slice;

use tracing::trace;

/// FIFO Queue di atas satu `Vec<T>` dengan read offset
///
/// Tidak ada sinkronisasi sama sekali. Untuk akses dari banyak thread
/// gunakan [`SyncQueue`](crate::SyncQueue).
#[derive(Debug, Clone)]
pub struct Queue<T> {
    // Isi queue: buf[off..buf.len()]
    buf: Vec<T>,
    // Read offset, selalu <= buf.len()
    off: usize,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for Queue<T> {
    fn from(buf: Vec<T>) -> Self {
        Self::from_vec(buf)
    }
}

impl<T> Queue<T> {
    /// Membuat queue kosong. Tidak ada alokasi sampai push pertama.
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            off: 0,
        }
    }

    /// Membuat queue kosong dengan kapasitas awal `capacity`
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            off: 0,
        }
    }

    /// Membuat queue dari `buf` milik caller.
    ///
    /// Queue mengambil alih ownership `buf`: isinya menjadi elemen awal
    /// queue (front = `buf[0]`), dan kapasitas sisanya dipakai untuk push
    /// berikutnya. Untuk sekadar menentukan kapasitas awal, berikan `Vec`
    /// kosong dengan kapasitas yang diinginkan.
    pub fn from_vec(buf: Vec<T>) -> Self {
        Self { buf, off: 0 }
    }

    /// Cek apakah queue kosong
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.buf.len() <= self.off
    }

    /// Jumlah elemen hidup; `q.len() == q.elems().len()`
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.buf.len() - self.off
    }

    /// Kapasitas buffer di bawahnya (informasi saja)
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// View (tanpa copy) atas semua elemen hidup, front di index 0
    #[inline]
    pub fn elems(&self) -> &[T] {
        &self.buf[self.off..]
    }

    /// Versi mutable dari [`elems`](Self::elems)
    #[inline]
    pub fn elems_mut(&mut self) -> &mut [T] {
        &mut self.buf[self.off..]
    }

    /// Iterator front-to-back atas elemen hidup
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.elems().iter()
    }

    /// Elemen di index logis `i` (0 = front)
    ///
    /// # Panics
    /// Panic jika `i >= self.len()`
    #[inline]
    pub fn get(&self, i: usize) -> &T {
        let len = self.len();
        assert!(
            i < len,
            "Queue::get: index {} out of range for length {}",
            i,
            len
        );
        &self.buf[self.off + i]
    }

    /// Seperti [`get`](Self::get), tapi `None` untuk index di luar range
    #[inline]
    pub fn try_get(&self, i: usize) -> Option<&T> {
        self.elems().get(i)
    }

    /// Mengosongkan queue tapi mempertahankan alokasi buffer.
    ///
    /// Semua elemen hidup di-drop di sini.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.off = 0;
    }

    /// Push elemen ke tail queue. Amortized O(1).
    #[inline]
    pub fn push(&mut self, e: T) {
        self.reserve_tail(1);
        self.buf.push(e);
    }

    /// Push semua `elems` ke tail queue, berurutan.
    ///
    /// Growth dihitung sekali untuk seluruh batch. Iterator yang ukurannya
    /// tidak pasti (`size_hint` tidak exact) dikumpulkan dulu ke `Vec`.
    pub fn push_n<I>(&mut self, elems: I)
    where
        I: IntoIterator<Item = T>,
    {
        let elems = elems.into_iter();
        match elems.size_hint() {
            (lo, Some(hi)) if lo == hi => {
                self.reserve_tail(lo);
                self.buf.extend(elems);
            }
            _ => {
                let elems: Vec<T> = elems.collect();
                self.reserve_tail(elems.len());
                self.buf.extend(elems);
            }
        }
    }

    /// Memastikan ada ruang untuk `n` slot baru setelah tail.
    ///
    /// Urutan: reslice (tidak ada pergerakan data), reset jika buffer
    /// sudah habis dikonsumsi, slide ke depan jika cukup longgar, dan
    /// terakhir realokasi ke `2*c + n`. Returns index tempat slot baru
    /// pertama ditulis, selalu sama dengan `buf.len()` setelah call ini.
    fn reserve_tail(&mut self, n: usize) -> usize {
        // Fast path: masih ada ruang setelah tail
        if n <= self.buf.capacity() - self.buf.len() {
            return self.buf.len();
        }

        let m = self.len();
        if m == 0 && self.off != 0 {
            trace!(
                off = self.off,
                cap = self.buf.capacity(),
                "queue drained, reclaiming whole buffer"
            );
            self.reset();
            if n <= self.buf.capacity() {
                return 0;
            }
        }

        let c = self.buf.capacity();
        // Slide cukup butuh m+n <= c, tapi kita sisakan setengah kapasitas
        // supaya tidak terus-menerus menyalin.
        if c / 2 >= m && n <= c / 2 - m {
            trace!(len = m, off = self.off, cap = c, n, "sliding live elements to front");
            self.buf.drain(..self.off);
        } else {
            let new_cap = c
                .checked_mul(2)
                .and_then(|c2| c2.checked_add(n))
                .unwrap_or_else(|| panic!("Queue: capacity overflow growing by {}", n));
            trace!(len = m, off = self.off, cap = c, new_cap, "reallocating queue buffer");
            let mut buf = Vec::with_capacity(new_cap);
            buf.extend(self.buf.drain(self.off..));
            self.buf = buf;
        }

        self.off = 0;
        m
    }
}

impl<T: Default> Queue<T> {
    /// Menambah ruang untuk `n` elemen lagi tanpa alokasi.
    ///
    /// Catatan: `n` slot baru langsung terlihat sebagai elemen berisi
    /// `T::default()`, jadi setelah `grow(n)` berlaku `len()` lama `+ n`.
    ///
    /// # Panics
    /// Panic jika kapasitas baru overflow `usize`
    pub fn grow(&mut self, n: usize) {
        let at = self.reserve_tail(n);
        self.buf.resize_with(at + n, T::default);
    }

    /// Pop elemen dari front queue.
    ///
    /// Returns `None` jika queue kosong; dalam kasus itu queue di-reset
    /// untuk mengambil kembali ruang di depan offset.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            self.reset();
            return None;
        }

        let e = mem::take(&mut self.buf[self.off]);
        self.off += 1;
        Some(e)
    }

    /// Memindahkan sampai `dst.len()` elemen dari front ke `dst`.
    ///
    /// Returns jumlah elemen yang dipindahkan. Nilai lama di `dst` di-drop.
    pub fn pop_n(&mut self, dst: &mut [T]) -> usize {
        if self.is_empty() {
            self.reset();
            return 0;
        }

        let n = dst.len().min(self.len());
        let src = &mut self.buf[self.off..self.off + n];
        for (slot, e) in dst.iter_mut().zip(src) {
            *slot = mem::take(e);
        }

        self.off += n;
        n
    }

    /// Membuang sampai `n` elemen dari front.
    ///
    /// Returns jumlah elemen yang benar-benar dibuang (maksimal `len()`).
    pub fn skip(&mut self, n: usize) -> usize {
        if self.is_empty() {
            self.reset();
            return 0;
        }

        let n = n.min(self.len());
        for e in &mut self.buf[self.off..self.off + n] {
            // drop sekarang, bukan saat slot ditimpa nanti
            *e = T::default();
        }

        self.off += n;
        n
    }
}

impl<'a, T> IntoIterator for &'a Queue<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
