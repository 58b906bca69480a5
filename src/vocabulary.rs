//! Fixed pass-through key vocabulary.
//!
//! A vocabulary is a set of key names considered universally safe to
//! forward: host-level interaction handlers and presentation attributes
//! that any consumer may receive. A stage opts in with
//! `include_pass_through`; the vocabulary itself is immutable once the
//! pipeline is compiled.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Key names in the built-in host vocabulary: interaction handlers plus
/// common presentation and accessibility attributes.
const HOST_KEYS: &[&str] = &[
    "id",
    "className",
    "style",
    "title",
    "role",
    "tabIndex",
    "hidden",
    "onClick",
    "onDoubleClick",
    "onContextMenu",
    "onChange",
    "onInput",
    "onSubmit",
    "onReset",
    "onFocus",
    "onBlur",
    "onKeyDown",
    "onKeyPress",
    "onKeyUp",
    "onMouseDown",
    "onMouseEnter",
    "onMouseLeave",
    "onMouseMove",
    "onMouseOut",
    "onMouseOver",
    "onMouseUp",
    "onTouchStart",
    "onTouchMove",
    "onTouchEnd",
    "onTouchCancel",
    "onScroll",
    "onWheel",
    "onDrag",
    "onDragStart",
    "onDragEnd",
    "onDragEnter",
    "onDragLeave",
    "onDragOver",
    "onDrop",
    "aria-label",
    "aria-hidden",
    "aria-disabled",
];

static HOST_VOCABULARY: Lazy<Vocabulary> =
    Lazy::new(|| Vocabulary::new(HOST_KEYS.iter().copied()));

/// An immutable set of key names eligible for pass-through forwarding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    keys: HashSet<String>,
}

impl Vocabulary {
    /// Build a vocabulary from any collection of key names.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// An empty vocabulary: pass-through retains nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The process-wide default vocabulary of host interaction and
    /// attribute key names.
    pub fn host() -> &'static Vocabulary {
        &HOST_VOCABULARY
    }

    /// Whether `key` belongs to the vocabulary.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Number of key names in the vocabulary.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
