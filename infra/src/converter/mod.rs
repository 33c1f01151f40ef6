//! Converter resolution for the query layer

mod resolver;

pub use resolver::{ConverterResolver, ResolutionRule};
