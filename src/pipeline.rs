//! Mapper compilation and pipeline invocation.
//!
//! Compilation validates the mapper once and produces a reusable
//! [`Pipeline`]. Invocation applies every stage's filter to the same input
//! record, accumulates one output per stage plus a snapshot of the
//! untouched input, and hands the whole result to a terminal callback in a
//! single synchronous call.

use crate::error::ConfigError;
use crate::filter::filter_stage;
use crate::mapper::{Mapper, StageConfig};
use crate::record::Record;
use crate::vocabulary::Vocabulary;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashSet;

/// Reserved result key holding the untouched input snapshot.
pub const ALL_KEY: &str = "all";

/// Compile a mapper against the default host vocabulary.
///
/// Fails fast on configuration errors; no partial pipeline is usable.
pub fn compile(mapper: Mapper) -> Result<Pipeline, ConfigError> {
    Pipeline::with_vocabulary(mapper, Vocabulary::host().clone())
}

/// One compiled stage: the declared name plus its validated configuration.
#[derive(Debug)]
struct CompiledStage {
    name: String,
    config: StageConfig,
}

/// A compiled projection pipeline.
///
/// Stable and reusable: invocations take `&self`, share no mutable state,
/// and are safe to run concurrently on different records.
#[derive(Debug)]
pub struct Pipeline {
    stages: Vec<CompiledStage>,
    vocabulary: Vocabulary,
}

impl Pipeline {
    /// Compile a mapper against a custom pass-through vocabulary.
    pub fn with_vocabulary(mapper: Mapper, vocabulary: Vocabulary) -> Result<Self, ConfigError> {
        {
            let mut seen = HashSet::new();
            for (name, _) in mapper.entries() {
                if name == ALL_KEY {
                    return Err(ConfigError::ReservedStageName(name.to_string()));
                }
                if !seen.insert(name) {
                    return Err(ConfigError::DuplicateStage(name.to_string()));
                }
            }
        }

        let stages: Vec<CompiledStage> = mapper
            .into_stages()
            .into_iter()
            .map(|(name, config)| CompiledStage { name, config })
            .collect();

        tracing::debug!("compiled pipeline with {} stages", stages.len());
        Ok(Self { stages, vocabulary })
    }

    /// Number of compiled stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Project `record` through every stage and hand the accumulated result
    /// to `terminal`, returning whatever it returns.
    ///
    /// The snapshot is captured once, before any stage runs; every stage
    /// then filters the *original* record (stages are independent
    /// projections, not sequential transforms of each other's output). The
    /// callback fires exactly once, synchronously, after the last stage.
    pub fn run<T>(&self, record: &Record, terminal: impl FnOnce(Accumulated) -> T) -> T {
        let all = record.clone();
        let mut outputs = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let output = filter_stage(record, &stage.config, &self.vocabulary);
            tracing::trace!(
                "stage '{}' kept {} of {} keys",
                stage.name,
                output.len(),
                record.len()
            );
            outputs.push((stage.name.clone(), output));
        }

        terminal(Accumulated {
            all,
            stages: outputs,
        })
    }

    /// Tolerant variant for hosts composed without a terminal consumer:
    /// with `None`, no accumulation is performed and `None` is returned.
    pub fn run_opt<T, F>(&self, record: &Record, terminal: Option<F>) -> Option<T>
    where
        F: FnOnce(Accumulated) -> T,
    {
        terminal.map(|terminal| self.run(record, terminal))
    }
}

/// The accumulated result delivered to the terminal callback: the untouched
/// input snapshot plus one filtered record per stage, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulated {
    all: Record,
    stages: Vec<(String, Record)>,
}

impl Accumulated {
    /// The untouched input snapshot.
    pub fn all(&self) -> &Record {
        &self.all
    }

    /// A stage's filtered output, by stage name.
    pub fn stage(&self, name: &str) -> Option<&Record> {
        self.stages
            .iter()
            .find(|(stage, _)| stage == name)
            .map(|(_, record)| record)
    }

    /// Stage outputs in declaration order.
    pub fn stages(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.stages
            .iter()
            .map(|(name, record)| (name.as_str(), record))
    }

    /// Number of stage entries (the snapshot is not counted).
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether there are no stage entries.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

/// Renders as a JSON object: the snapshot under [`ALL_KEY`] first, then one
/// entry per stage in declaration order.
impl Serialize for Accumulated {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.stages.len() + 1))?;
        map.serialize_entry(ALL_KEY, &self.all)?;
        for (name, record) in &self.stages {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}
