pub mod error;
pub mod normalize;
pub mod runtime;
pub mod sources;
pub mod types;
