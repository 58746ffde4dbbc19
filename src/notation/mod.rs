//! Notation identification and conversion module
//!
//! This module classifies expressions as infix, prefix or postfix and
//! rewrites them between the three notations.

mod converter;
pub mod cursor;
mod kind;
pub mod token;


pub use converter::*;
pub use cursor::*;
pub use kind::*;
pub use token::*;
