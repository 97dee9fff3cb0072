pub mod error_code;
pub mod response;
