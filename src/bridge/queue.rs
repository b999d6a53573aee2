//! Byte queue between the line driver's receive context and the poll loop.
//!
//! The receive side runs in an asynchronous context (an interrupt handler on
//! real hardware, a reader thread in the harness) and must never block, so
//! the ring is guarded by a single mutex with O(1) hold time and `put`
//! drops the byte instead of waiting when the ring is full. The line
//! protocol is slow enough that an overrun is an accepted data-loss
//! boundary, not a fault.

use std::sync::{Arc, Mutex};

use tracing::warn;

pub const QUEUE_CAPACITY: usize = 10;

struct Ring {
    buf: [u8; QUEUE_CAPACITY],
    head: usize,
    len: usize,
}

/// Cloneable handle to the shared scan-code FIFO. One clone goes to the
/// line driver as its receive callback context, the other stays with the
/// bridge's poll loop.
#[derive(Clone)]
pub struct ScanQueue {
    inner: Arc<Mutex<Ring>>,
}

impl ScanQueue {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Ring {
                buf: [0; QUEUE_CAPACITY],
                head: 0,
                len: 0,
            })),
        }
    }

    /// Enqueue one received byte. Returns false (and drops the byte) when
    /// the ring is full.
    pub fn put(&self, byte: u8) -> bool {
        let mut ring = self.inner.lock().unwrap();
        if ring.len == QUEUE_CAPACITY {
            warn!("scan queue full, dropping byte {byte:02X}");
            return false;
        }
        let tail = (ring.head + ring.len) % QUEUE_CAPACITY;
        ring.buf[tail] = byte;
        ring.len += 1;
        true
    }

    /// Dequeue the oldest byte, if any.
    pub fn get(&self) -> Option<u8> {
        let mut ring = self.inner.lock().unwrap();
        if ring.len == 0 {
            return None;
        }
        let byte = ring.buf[ring.head];
        ring.head = (ring.head + 1) % QUEUE_CAPACITY;
        ring.len -= 1;
        Some(byte)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ScanQueue {
    fn default() -> Self {
        Self::new()
    }
}
