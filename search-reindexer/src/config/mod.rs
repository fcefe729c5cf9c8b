//! Configuration and dependency wiring for the search reindexer.

mod dependencies;

pub use dependencies::Dependencies;
