//! Crustadf is a SAT-based reasoner for Abstract Dialectical Frameworks (ADFs).
//!
//! ADFs are read from the KPP format by the [io] module; their models are computed by an [AdfReasoner](solvers::AdfReasoner),
//! sequentially or with several threads.

#![warn(missing_docs)]

pub mod adf;

pub mod encodings;

pub mod error;

pub mod io;

pub mod sat;

pub mod solvers;
