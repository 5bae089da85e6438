//! Bundle input fingerprint.
//!
//! xxh3_64 over a length-prefixed framing: kind byte | len(label) | label | len(content) | content,
//! repeated for the entry and every css/js file in injection order. Every field carries its
//! length, so moving bytes between neighbouring fields changes the hash input.
//!
//! Only what reaches the document is hashed: asset labels are the `data-file` names and the
//! entry has no label. Moving or renaming a folder above an asset leaves the hash alone.

use crate::models::FileNode;
use xxhash_rust::xxh3::Xxh3;

const ENTRY: u8 = 0;
const STYLE: u8 = 1;
const SCRIPT: u8 = 2;

pub struct Fingerprinter {
    hasher: Xxh3,
    items: u64,
}

impl Fingerprinter {
    pub fn new() -> Self {
        Self {
            hasher: Xxh3::new(),
            items: 0,
        }
    }

    fn field(&mut self, bytes: &[u8]) {
        self.hasher.update(&(bytes.len() as u64).to_le_bytes());
        self.hasher.update(bytes);
    }

    pub fn add(&mut self, kind: u8, label: &str, content: &str) {
        self.hasher.update(&[kind]);
        self.field(label.as_bytes());
        self.field(content.as_bytes());
        self.items += 1;
    }

    pub fn finish(mut self) -> u64 {
        self.hasher.update(&self.items.to_le_bytes());
        self.hasher.digest()
    }
}

impl Default for Fingerprinter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn fingerprint(entry: &FileNode, css: &[&FileNode], js: &[&FileNode]) -> u64 {
    let mut fp = Fingerprinter::new();
    fp.add(ENTRY, "", entry.content().unwrap_or_default());
    for node in css {
        fp.add(STYLE, node.name(), node.content().unwrap_or_default());
    }
    for node in js {
        fp.add(SCRIPT, node.name(), node.content().unwrap_or_default());
    }
    fp.finish()
}
