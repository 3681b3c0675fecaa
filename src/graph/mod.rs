//! # Processing Graph Module
//!
//! Builds declarative processing-graph descriptions for the external engine.
//! A graph is an ordered list of named filter stages per stream kind plus
//! terminal output settings; it references only stream kinds actually present
//! in the probed inventory, enforced by construction in [`GraphBuilder`].

pub mod builder;
pub mod types;

pub use builder::GraphBuilder;
pub use types::{ClipWindow, FilterStage, GraphDescription, OutputSettings};
