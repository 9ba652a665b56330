//! Benchmark scenes and reporting for the `bake-bench` runner.
pub mod report;
pub mod runner;
pub mod scenes;
