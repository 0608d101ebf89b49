pub mod lending;
pub mod serializer;
pub mod token_conversion;
pub mod token_registry;
