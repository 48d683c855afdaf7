mod account;
pub mod dto;
pub mod extract;
pub mod response;
mod router;
pub mod user;
pub mod validation;

pub use router::{AppState, build_cors_layer, create_router};
pub use user::user_router;
