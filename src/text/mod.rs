pub mod normalize;
pub mod tokenize;

pub use normalize::*;
pub use tokenize::*;
