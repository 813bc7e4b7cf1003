//! Changelog file workflows for Changewright

mod changelog;

pub use changelog::*;
