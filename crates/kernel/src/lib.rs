//! Quill kernel: settings, the module lifecycle, and the storage and
//! validation contracts shared by every resource module.

pub mod module;
pub mod registry;
pub mod settings;
pub mod store;
pub mod validation;

pub use module::{InitCtx, Migration, Module};
pub use registry::ModuleRegistry;
pub use store::{Store, StoreError};
pub use validation::{FieldViolation, Validate, ValidationError};
