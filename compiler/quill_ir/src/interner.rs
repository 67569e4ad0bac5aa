//! String interner for identifier storage.
//!
//! Provides O(1) interning and lookup. Lowering is single-threaded and
//! non-reentrant, so the interner carries no locking; share one instance
//! between the front end and the render context for a compilation unit.

use rustc_hash::FxHashMap;

use crate::Name;

/// String interner mapping identifier text to compact [`Name`] handles.
///
/// The empty string is pre-interned as [`Name::EMPTY`].
#[derive(Debug)]
pub struct StringInterner {
    /// Map from string content to its index in `strings`.
    map: FxHashMap<Box<str>, u32>,
    /// Storage for interned contents, indexed by `Name::index()`.
    strings: Vec<Box<str>>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned.
    pub fn new() -> Self {
        let mut interner = Self {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(64),
        };
        let empty = interner.intern("");
        debug_assert_eq!(empty, Name::EMPTY);
        interner
    }

    /// Intern a string, returning its `Name`.
    ///
    /// Interning the same content twice returns the same handle.
    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(&idx) = self.map.get(s) {
            return Name::from_raw(idx);
        }
        let idx = self.strings.len();
        assert!(idx < u32::MAX as usize, "interner overflow");
        let boxed: Box<str> = s.into();
        self.strings.push(boxed.clone());
        self.map.insert(boxed, idx as u32);
        Name::from_raw(idx as u32)
    }

    /// Resolve a `Name` back to its string content.
    ///
    /// # Panics
    /// Panics if `name` was not produced by this interner.
    pub fn lookup(&self, name: Name) -> &str {
        &self.strings[name.index()]
    }

    /// Number of interned strings (including the pre-interned empty string).
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the interner holds only the pre-interned empty string.
    pub fn is_empty(&self) -> bool {
        self.strings.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
