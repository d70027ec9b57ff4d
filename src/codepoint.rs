//! Codepoint assignment for imported glyphs.
//!
//! Source files named `uEA01-home.svg` pin their codepoint; everything else
//! gets the next free private-use-area value in sorted-filename order, which
//! keeps repeated builds of an unchanged source directory stable.

use crate::error::IconFontError;
use std::collections::BTreeSet;

/// First codepoint handed out when a file doesn't pin one.
pub const DEFAULT_START_CODEPOINT: u32 = 0xEA01;

/// Splits a `uXXXX-name` file stem into its pinned codepoint and glyph name.
///
/// Returns `None` when the stem carries no marker (the whole stem is then the
/// glyph name). Markers are 4 to 6 hex digits and must name a valid scalar.
pub fn split_marker(stem: &str) -> Option<(char, &str)> {
    let rest = stem.strip_prefix('u')?;
    let (hex, name) = rest.split_once('-')?;
    if !(4..=6).contains(&hex.len()) || name.is_empty() {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    char::from_u32(value).map(|c| (c, name))
}

/// Hands out codepoints, skipping ones already pinned by file markers.
#[derive(Debug)]
pub struct CodepointAllocator {
    next: u32,
    taken: BTreeSet<u32>,
}

impl CodepointAllocator {
    pub fn new(start: u32) -> Self {
        CodepointAllocator {
            next: start,
            taken: BTreeSet::new(),
        }
    }

    /// Record a pinned codepoint. `owner` and the previous claimant appear in
    /// the error when two files pin the same value.
    pub fn reserve(
        &mut self,
        codepoint: char,
        owner: &str,
        owners: &mut std::collections::HashMap<u32, String>,
    ) -> Result<(), IconFontError> {
        let value = codepoint as u32;
        if let Some(first) = owners.get(&value) {
            return Err(IconFontError::DuplicateCodepoint {
                codepoint: value,
                first: first.clone(),
                second: owner.to_string(),
            });
        }
        owners.insert(value, owner.to_string());
        self.taken.insert(value);
        Ok(())
    }

    /// The next free scalar at or after the start value.
    pub fn allocate(&mut self, owner: &str) -> Result<char, IconFontError> {
        loop {
            let candidate = self.next;
            self.next = self.next.checked_add(1).ok_or_else(|| {
                IconFontError::CodepointsExhausted {
                    last: owner.to_string(),
                }
            })?;
            if self.taken.contains(&candidate) {
                continue;
            }
            if let Some(c) = char::from_u32(candidate) {
                self.taken.insert(candidate);
                return Ok(c);
            }
            // surrogate range, keep walking
        }
    }
}
