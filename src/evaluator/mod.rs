//! Integer evaluation of expressions in any of the three notations

pub mod arith;
mod engine;


pub use engine::*;
