pub mod exporter;
pub mod extractor;
pub mod pagination;
pub mod runner;
