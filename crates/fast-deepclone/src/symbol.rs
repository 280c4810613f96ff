//! Unique symbols

use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::string::JsString;

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

/// A JavaScript symbol. Two symbols are equal only if they are the same symbol.
#[derive(Debug)]
pub struct Symbol {
    id: u64,
    description: Option<JsString>,
}

impl Symbol {
    /// Create a fresh symbol
    pub fn new(description: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description: description.map(JsString::new),
        })
    }

    /// Unique id of this symbol
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Optional description passed at creation
    pub fn description(&self) -> Option<&JsString> {
        self.description.as_ref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
