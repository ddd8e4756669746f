pub mod errors;
pub mod node;
pub mod schema;

pub use schema::{AppSchema, build_schema};
