//! Command implementations.

pub mod scan;

pub use scan::ScanArgs;
