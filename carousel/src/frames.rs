#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::Rect;

#[cfg(feature = "std")]
type FrameMap = HashMap<usize, Rect>;
#[cfg(not(feature = "std"))]
type FrameMap = BTreeMap<usize, Rect>;

/// Last laid-out frame per item index.
///
/// Entries are created lazily the first time an index is laid out, overwritten in place on
/// re-layout and only dropped by [`FrameCache::clear`]. Stale entries outside the visible range
/// are harmless.
#[derive(Clone, Debug, Default)]
pub(crate) struct FrameCache {
    frames: FrameMap,
}

impl FrameCache {
    pub(crate) fn new() -> Self {
        Self {
            frames: FrameMap::new(),
        }
    }

    pub(crate) fn put_or_set(&mut self, index: usize, frame: Rect) {
        match self.frames.get_mut(&index) {
            Some(slot) => *slot = frame,
            None => {
                self.frames.insert(index, frame);
            }
        }
    }

    pub(crate) fn get(&self, index: usize) -> Option<Rect> {
        self.frames.get(&index).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.frames.len()
    }

    pub(crate) fn clear(&mut self) {
        self.frames.clear();
    }
}
