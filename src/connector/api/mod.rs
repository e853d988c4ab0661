pub mod container;
pub mod server;

pub use container::{Container, ContainerConfig};
pub use server::{app_router, run_server, AppState, ServerConfig};
