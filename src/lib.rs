//! MOSE Engine - Design evaluation for the MOSE storm-surge barrier
//!
//! This crate scores barrier designs for stakeholder-driven decision making:
//! closed-form metrics, monotone preference curves, stakeholder weighting,
//! and weighted-sum ("Tetra") and Min–Max aggregation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
