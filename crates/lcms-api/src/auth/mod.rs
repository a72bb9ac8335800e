pub mod jwt;
pub mod middleware;
pub mod routes;

pub use middleware::AdminUser;
pub use routes::routes;
