//! HTTP transport: multipart decoding, handlers and error mapping.

pub mod dto;
pub mod errors;
pub mod handlers;
pub mod multipart;
pub mod routes;

pub use errors::ApiError;
pub use routes::create_router;
