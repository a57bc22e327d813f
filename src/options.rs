use crate::constants::RESYNC_WINDOW;

/// Knobs for a single decode call.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Forward tolerance, in characters, when a string's declared
    /// length does not land on a `";` terminator.
    pub resync_window: usize,
    /// Retain the raw scanned region on recovery notes. Turning this
    /// off skips the diagnostic copies on large damaged blobs.
    pub keep_raw: bool,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resync_window(mut self, resync_window: usize) -> Self {
        self.resync_window = resync_window;
        self
    }

    pub fn with_keep_raw(mut self, keep_raw: bool) -> Self {
        self.keep_raw = keep_raw;
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            resync_window: RESYNC_WINDOW,
            keep_raw: true,
        }
    }
}
