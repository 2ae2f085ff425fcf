//! Quill application library: the books and todos resource modules and the
//! bootstrap that wires them into the kernel, database, and HTTP server.

pub mod app;
pub mod modules;
pub mod utils;

pub use app::{migrate, openapi_document, serve, Application};
