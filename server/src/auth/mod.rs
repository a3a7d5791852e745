//! Authentication at the API boundary.

mod middleware;

pub use middleware::AuthUser;
