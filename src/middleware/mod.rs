pub mod auth;
pub mod roles;
pub mod security_headers;

pub use auth::AuthMiddleware;
pub use roles::{AdminOnly, Authorized, UserOrAbove};
pub use security_headers::SecurityHeaders;
