//! Declarative mapper definitions.
//!
//! Mapper definition format (JSON, one entry per stage):
//! ```text
//! {
//!   "hero": {
//!     "selection": ["heroName"],
//!     "remap": { "name": "heroName" },
//!     "includePassThrough": false
//!   },
//!   "ui": {
//!     "selection": [],
//!     "includePassThrough": true
//!   }
//! }
//! ```
//!
//! - The top level is an object; its entry order is the stage order.
//! - `selection` is the stage's allow-list (array of key names, may be
//!   empty or omitted).
//! - `remap` maps a source key to a target key name; entry order is the
//!   remap order. Transforms are programmatic-only: a definition file can
//!   express pure renames, closures are attached via
//!   [`StageConfig::transform`](crate::StageConfig::transform).
//! - `includePassThrough` opts the stage in to the pass-through vocabulary
//!   (default false).
//!
//! Unrecognized stage fields and non-string remap targets are rejected at
//! parse time.

use crate::error::ConfigError;
use crate::mapper::{Mapper, RemapTarget, StageConfig};
use crate::pipeline::{self, Pipeline};
use crate::record::Value;
use serde::Deserialize;

/// Raw stage definition as it appears in the JSON form.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
struct StageDef {
    selection: Vec<String>,
    remap: serde_json::Map<String, Value>,
    include_pass_through: bool,
}

/// Parse a mapper definition into a validated [`Mapper`].
pub fn parse_mapper(text: &str) -> Result<Mapper, ConfigError> {
    let root: serde_json::Map<String, Value> = serde_json::from_str(text)?;

    let mut mapper = Mapper::new();
    for (name, spec) in root {
        let config = parse_stage(&name, spec)?;
        mapper = mapper.stage(name, config);
    }
    Ok(mapper)
}

/// Parse a mapper definition and compile it against the default vocabulary.
pub fn compile_definition(text: &str) -> Result<Pipeline, ConfigError> {
    pipeline::compile(parse_mapper(text)?)
}

fn parse_stage(name: &str, spec: Value) -> Result<StageConfig, ConfigError> {
    let def: StageDef = serde_json::from_value(spec).map_err(|e| ConfigError::InvalidStage {
        stage: name.to_string(),
        message: e.to_string(),
    })?;

    let mut config = StageConfig {
        selection: def.selection,
        include_pass_through: def.include_pass_through,
        ..StageConfig::default()
    };

    for (source, target) in def.remap {
        let Value::String(target) = target else {
            return Err(ConfigError::InvalidStage {
                stage: name.to_string(),
                message: format!("remap target for '{source}' must be a key name"),
            });
        };
        config.remap.push((source, RemapTarget::Rename(target)));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use serde_json::json;

    #[test]
    fn test_parse_single_stage() {
        let mapper = parse_mapper(
            r#"{ "hero": { "selection": ["heroName"], "remap": { "name": "heroName" } } }"#,
        )
        .unwrap();

        assert_eq!(mapper.len(), 1);
        let (name, config) = mapper.entries().next().unwrap();
        assert_eq!(name, "hero");
        assert_eq!(config.selection, vec!["heroName"]);
        assert_eq!(config.remap.len(), 1);
        assert!(!config.include_pass_through);
    }

    #[test]
    fn test_parse_preserves_stage_order() {
        let mapper = parse_mapper(
            r#"{
                "zeta": { "selection": ["a"] },
                "alpha": { "selection": ["b"] }
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = mapper.entries().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_parse_preserves_remap_order() {
        let mapper =
            parse_mapper(r#"{ "s": { "remap": { "zeta": "target", "alpha": "target" } } }"#)
                .unwrap();

        let (_, config) = mapper.entries().next().unwrap();
        let sources: Vec<&str> = config
            .remap
            .iter()
            .map(|(source, _)| source.as_str())
            .collect();
        assert_eq!(sources, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_parse_include_pass_through() {
        let mapper =
            parse_mapper(r#"{ "ui": { "selection": [], "includePassThrough": true } }"#).unwrap();
        let (_, config) = mapper.entries().next().unwrap();
        assert!(config.include_pass_through);
    }

    #[test]
    fn test_parse_defaults_for_omitted_fields() {
        let mapper = parse_mapper(r#"{ "bare": {} }"#).unwrap();
        let (_, config) = mapper.entries().next().unwrap();
        assert!(config.selection.is_empty());
        assert!(config.remap.is_empty());
        assert!(!config.include_pass_through);
    }

    #[test]
    fn test_parse_rejects_non_object_root() {
        let err = parse_mapper("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidJson(_)));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = parse_mapper("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidJson(_)));
    }

    #[test]
    fn test_parse_rejects_unrecognized_field() {
        let err = parse_mapper(r#"{ "hero": { "allowList": ["x"] } }"#).unwrap_err();
        match err {
            ConfigError::InvalidStage { stage, message } => {
                assert_eq!(stage, "hero");
                assert!(message.contains("allowList"), "message: {message}");
            }
            other => panic!("expected InvalidStage, got {other}"),
        }
    }

    #[test]
    fn test_parse_rejects_non_string_remap_target() {
        let err = parse_mapper(r#"{ "hero": { "remap": { "name": 7 } } }"#).unwrap_err();
        match err {
            ConfigError::InvalidStage { stage, message } => {
                assert_eq!(stage, "hero");
                assert_eq!(message, "remap target for 'name' must be a key name");
            }
            other => panic!("expected InvalidStage, got {other}"),
        }
    }

    #[test]
    fn test_parse_rejects_non_string_selection_entry() {
        let err = parse_mapper(r#"{ "hero": { "selection": [1] } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidStage { .. }));
    }

    #[test]
    fn test_compile_definition_end_to_end() {
        let pipeline = compile_definition(
            r#"{ "hero": { "selection": ["heroName"], "remap": { "name": "heroName" } } }"#,
        )
        .unwrap();

        let input: Record = [
            ("name".to_string(), json!("Tony")),
            ("extra".to_string(), json!(1)),
        ]
        .into_iter()
        .collect();

        pipeline.run(&input, |result| {
            assert_eq!(result.all(), &input);
            let hero = result.stage("hero").unwrap();
            assert_eq!(hero.len(), 1);
            assert_eq!(hero["heroName"], json!("Tony"));
        });
    }

    #[test]
    fn test_compile_definition_rejects_reserved_stage() {
        let err = compile_definition(r#"{ "all": { "selection": [] } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ReservedStageName(_)));
    }
}
