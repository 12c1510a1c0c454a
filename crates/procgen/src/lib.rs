//! World population: decoration tables, random scatter and load tracking.

pub mod decorations;
pub mod populate;
pub mod progress;
pub mod scatter;

pub use decorations::*;
pub use populate::*;
pub use progress::*;
pub use scatter::*;
