pub mod db;
pub mod models;
pub mod mutations;
pub mod queries;
pub mod validation;

pub use models::AttributeNode;
pub use mutations::{AttributeCreateInput, AttributeCreateValueInput, AttributeUpdateInput};
