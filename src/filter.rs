//! Per-stage record filtering.
//!
//! Each compiled stage runs this pure function at invocation time: clone
//! the input record, apply the stage's remap entries in declaration order,
//! then keep only the keys admitted by the allow-list or the pass-through
//! vocabulary. The input record is never touched.

use crate::mapper::{RemapTarget, StageConfig};
use crate::record::{Record, Value};
use crate::vocabulary::Vocabulary;

/// Produce one stage's filtered output for `record`.
///
/// Deterministic, synchronous, and total over any record shape: remapping
/// an absent source key binds `Value::Null` under the target name rather
/// than failing. Presence checks are the caller's responsibility.
pub fn filter_stage(record: &Record, config: &StageConfig, vocabulary: &Vocabulary) -> Record {
    let mut working = record.clone();

    for (source, target) in &config.remap {
        match target {
            RemapTarget::Rename(new_key) => {
                // Empty target: no-op for this entry.
                if new_key.is_empty() {
                    continue;
                }
                let value = working.get(source).cloned().unwrap_or(Value::Null);
                working.insert(new_key.clone(), value);
                if new_key != source {
                    working.remove(source);
                }
            }
            RemapTarget::Transform(transform) => {
                let (new_key, new_value) = transform(source, working.get(source));
                working.insert(new_key.clone(), new_value);
                if new_key != *source {
                    working.remove(source);
                }
            }
        }
    }

    working
        .into_iter()
        .filter(|(key, _)| {
            (config.include_pass_through && vocabulary.contains(key))
                || config.selection.iter().any(|allowed| allowed == key)
        })
        .collect()
}
