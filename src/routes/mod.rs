pub mod auth;

pub mod courses;

pub mod solutions;

pub use auth::configure_auth_routes;
pub use courses::configure_courses_routes;
pub use solutions::configure_solutions_routes;
