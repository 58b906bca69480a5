//! Mapper and stage configuration.
//!
//! A mapper is an ordered set of named stages. Each stage describes one
//! projection of the input record: which keys it may keep (`selection`),
//! how source keys are renamed or derived before selection (`remap`), and
//! whether keys from the pass-through vocabulary are retained as well.

use crate::record::Value;
use std::fmt;

/// A host-supplied key/value transform.
///
/// Invoked with the source key and the value currently bound to it in the
/// working copy (`None` when the key is absent). Returns the new key name
/// and the value to bind under it.
pub type TransformFn = dyn Fn(&str, Option<&Value>) -> (String, Value) + Send + Sync;

/// Target of a single remap entry, decided at configuration time.
///
/// The variant replaces runtime type inspection of the declarative form:
/// a rename carries the literal target name, a transform computes both the
/// new key and the new value. A transform cannot produce a non-string key;
/// its return type rules that out.
pub enum RemapTarget {
    /// Pure rename: bind the source value under the target key.
    Rename(String),
    /// Derived rename: compute the new key and value from the source entry.
    Transform(Box<TransformFn>),
}

impl fmt::Debug for RemapTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rename(target) => f.debug_tuple("Rename").field(target).finish(),
            Self::Transform(_) => f.write_str("Transform(..)"),
        }
    }
}

/// Configuration for one named projection stage.
#[derive(Debug, Default)]
pub struct StageConfig {
    /// Keys the stage is allowed to keep in its output. May be empty.
    pub selection: Vec<String>,
    /// Remap entries applied before selection, in declaration order.
    ///
    /// Declaration order is observable: a rename that collides with an
    /// existing key overwrites it, last write wins.
    pub remap: Vec<(String, RemapTarget)>,
    /// Also retain any key belonging to the pass-through vocabulary.
    pub include_pass_through: bool,
}

impl StageConfig {
    /// Start a config from its allow-list.
    pub fn select<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selection: keys.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Append a pure rename entry.
    pub fn rename(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.remap
            .push((source.into(), RemapTarget::Rename(target.into())));
        self
    }

    /// Append a key/value transform entry.
    pub fn transform<F>(mut self, source: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&str, Option<&Value>) -> (String, Value) + Send + Sync + 'static,
    {
        self.remap
            .push((source.into(), RemapTarget::Transform(Box::new(transform))));
        self
    }

    /// Opt in to the pass-through vocabulary.
    pub fn pass_through(mut self) -> Self {
        self.include_pass_through = true;
        self
    }
}

/// Ordered mapping of stage name to stage configuration.
///
/// Order is significant: stages are applied in declaration order and their
/// outputs appear in that order in the accumulated result.
#[derive(Debug, Default)]
pub struct Mapper {
    stages: Vec<(String, StageConfig)>,
}

impl Mapper {
    /// Create an empty mapper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named stage.
    pub fn stage(mut self, name: impl Into<String>, config: StageConfig) -> Self {
        self.stages.push((name.into(), config));
        self
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the mapper has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &StageConfig)> {
        self.stages.iter().map(|(name, config)| (name.as_str(), config))
    }

    pub(crate) fn into_stages(self) -> Vec<(String, StageConfig)> {
        self.stages
    }
}
