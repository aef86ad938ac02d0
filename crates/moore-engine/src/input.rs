//! Pointer sample stream feeding the brush.
//!
//! The input layer owns a [`PointerSender`] and pushes one
//! [`PointerSample`] per pointer event. The context drains the stream
//! synchronously at the start of each tick, so every brush pass lands
//! between two generations and never overlaps a step.

use crossbeam_channel::{Receiver, Sender, TrySendError};

/// One pointer reading in normalized grid space.
///
/// `x` grows rightward and `y` grows upward: `(0, 0)` is the bottom-left
/// corner of the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Horizontal position in `[0, 1]`.
    pub x: f64,
    /// Vertical position in `[0, 1]`, 0 at the bottom.
    pub y: f64,
    /// Whether the pointer is engaged (button held or touch active).
    pub active: bool,
}

impl PointerSample {
    /// An engaged pointer at `(x, y)`.
    pub fn pressed(x: f64, y: f64) -> Self {
        Self { x, y, active: true }
    }

    /// A released pointer at `(x, y)`.
    pub fn released(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            active: false,
        }
    }
}

/// Producer handle for pointer samples. Cheap to clone.
#[derive(Clone, Debug)]
pub struct PointerSender {
    tx: Sender<PointerSample>,
}

impl PointerSender {
    /// Queue a sample. Returns `false` if the context has been dropped.
    pub fn send(&self, sample: PointerSample) -> bool {
        match self.tx.try_send(sample) {
            Ok(()) => true,
            Err(TrySendError::Disconnected(_)) | Err(TrySendError::Full(_)) => false,
        }
    }
}

/// Consumer side, owned by the context.
#[derive(Debug)]
pub(crate) struct PointerStream {
    tx: Sender<PointerSample>,
    rx: Receiver<PointerSample>,
}

impl PointerStream {
    pub(crate) fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    pub(crate) fn sender(&self) -> PointerSender {
        PointerSender {
            tx: self.tx.clone(),
        }
    }

    /// Take every sample queued so far, in arrival order.
    pub(crate) fn drain(&self) -> Vec<PointerSample> {
        self.rx.try_iter().collect()
    }
}
