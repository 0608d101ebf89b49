pub mod amounts;
pub mod lending;
pub mod resources;
pub mod utils;
pub mod validate_params;
