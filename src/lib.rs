//! # facets-rs
//!
//! A declarative record-projection engine.
//!
//! Given a named, ordered set of stage configurations (a *mapper*), the
//! engine compiles a pipeline that projects a single string-keyed record
//! into one filtered, renamed sub-record per stage, plus a snapshot of the
//! untouched input, and hands the whole accumulated result to a terminal
//! callback in one synchronous call. It is used to narrow a large property
//! bag down to the minimal, renamed subset each downstream consumer needs.
//!
//! ## Overview
//!
//! - **Compile once**: a [`Mapper`] is validated and compiled into a
//!   reusable [`Pipeline`]; configuration errors surface here, never
//!   per-record.
//! - **Run per record**: every stage filters the *original* record
//!   independently: remap pass first (renames and derived values), then an
//!   allow-list/pass-through selection pass.
//! - **Accumulate**: the terminal callback receives an [`Accumulated`]
//!   result with the input snapshot under the reserved `all` key and one
//!   entry per stage.
//!
//! Mappers can also be loaded from JSON definition files; see the
//! [`dsl`] module.
//!
//! ## Example
//!
//! ```
//! use facets_rs::{Mapper, Record, StageConfig, compile};
//! use serde_json::json;
//!
//! let mapper = Mapper::new().stage(
//!     "hero",
//!     StageConfig::select(["heroName"]).rename("name", "heroName"),
//! );
//! let pipeline = compile(mapper).unwrap();
//!
//! let record: Record = [
//!     ("name".to_string(), json!("Tony")),
//!     ("extra".to_string(), json!(1)),
//! ]
//! .into_iter()
//! .collect();
//!
//! pipeline.run(&record, |result| {
//!     assert_eq!(result.all().len(), 2);
//!     assert_eq!(result.stage("hero").unwrap()["heroName"], json!("Tony"));
//! });
//! ```

pub mod dsl;
pub mod error;
pub mod filter;
pub mod mapper;
pub mod pipeline;
pub mod record;
pub mod vocabulary;

pub use dsl::{compile_definition, parse_mapper};
pub use error::ConfigError;
pub use filter::filter_stage;
pub use mapper::{Mapper, RemapTarget, StageConfig, TransformFn};
pub use pipeline::{ALL_KEY, Accumulated, Pipeline, compile};
pub use record::{Record, Value};
pub use vocabulary::Vocabulary;
