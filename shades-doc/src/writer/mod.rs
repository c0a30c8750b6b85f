//! Documentation writers.

pub mod markup;
