pub mod auth;
pub mod dashboard;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod server;
pub mod state;

pub use auth::*;
pub use dashboard::*;
pub use error::*;
pub use handlers::*;
pub use routes::*;
pub use server::*;
pub use state::*;
