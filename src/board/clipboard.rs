//! Board-local copy/paste buffer.
//!
//! Each window owns its own clipboard; nothing goes through the OS clipboard.
//! Repeated pastes of the same contents cascade by [`PASTE_OFFSET_STEP`].

use crate::constants::PASTE_OFFSET_STEP;
use crate::types::ReferenceItem;

#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    items: Vec<ReferenceItem>,
    paste_count: u32,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with deep copies of `items` and reset the paste
    /// counter. An empty selection leaves the clipboard untouched.
    pub fn copy<'a, I>(&mut self, items: I) -> bool
    where
        I: IntoIterator<Item = &'a ReferenceItem>,
    {
        let copied: Vec<ReferenceItem> = items.into_iter().cloned().collect();
        if copied.is_empty() {
            return false;
        }
        self.items = copied;
        self.paste_count = 0;
        true
    }

    /// Fresh duplicates of the contents, offset by `15 * n` for the n-th
    /// paste and all stacked at `z_index`. Empty when nothing was copied.
    pub fn paste(&mut self, z_index: i64) -> Vec<ReferenceItem> {
        if self.items.is_empty() {
            return Vec::new();
        }

        self.paste_count += 1;
        let offset = PASTE_OFFSET_STEP * f64::from(self.paste_count);

        self.items
            .iter()
            .map(|item| {
                let mut pasted = item.duplicate();
                pasted.x += offset;
                pasted.y += offset;
                pasted.z_index = z_index;
                pasted
            })
            .collect()
    }

    pub fn items(&self) -> &[ReferenceItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn paste_count(&self) -> u32 {
        self.paste_count
    }
}
