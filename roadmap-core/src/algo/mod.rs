//! Whole-graph analyses

pub mod articulation;
