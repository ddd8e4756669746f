pub mod playground;
pub mod server;

pub use server::{ApiState, build_api_router, run_api};
