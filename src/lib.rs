//! tabkit - transformations for delimited text tables
//!
//! An in-memory engine for CSV/TSV tables held as text: re-delimiting, column
//! extraction, key-based merging, duplicate collapsing with value aggregation,
//! column reshaping, templating and predicate filtering. Every operation is a
//! pure function from one whole table to a new one, so operations chain.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod storage;
pub mod transform;

pub use config::Config;
pub use error::{TableError, TableResult};
pub use model::{ColumnRef, Table};
pub use pipeline::{Recipe, PipelineRunner};
