pub mod books;
pub mod todos;

use quill_authz::HeaderCredentials;
use quill_db::Database;
use quill_kernel::{settings::Settings, ModuleRegistry};

/// Register the `db` core module and every resource module.
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings, database: &Database) {
    registry.register_core(quill_db::create_module(database.clone()));
    registry.register_custom(books::create_module(HeaderCredentials::from_settings(
        &settings.auth,
    )));
    registry.register_custom(todos::create_module(database.clone()));
}
