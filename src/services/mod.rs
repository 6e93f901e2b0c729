//! Business logic: waterfall definitions, test generation, ownership
//! validation, and the standalone helper tools.

pub mod benchmarks;
pub mod echo;
pub mod expectations;
pub mod generate;
pub mod name_style;
pub mod ownership;
pub mod png;
pub mod rewrite;
pub mod waterfall;
