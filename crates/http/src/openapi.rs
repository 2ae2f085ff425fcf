//! Process-wide OpenAPI document assembled from module fragments.

use serde_json::{json, Value};

use quill_kernel::ModuleRegistry;

/// Merge every module's `paths` (prefixed with `/api/{name}`) and
/// `components.schemas` into one document, alongside the shared error and
/// envelope schemas and the process health routes.
pub fn merged_document(registry: &ModuleRegistry) -> Value {
    let mut document = json!({
        "openapi": "3.1.0",
        "info": {
            "title": "Quill API",
            "version": "1.0.0",
            "description": "Books and todos resource services"
        },
        "paths": {
            "/healthz": {
                "get": {
                    "summary": "Process health check",
                    "responses": {
                        "200": { "description": "All modules healthy" },
                        "503": { "description": "At least one module failed its probe" }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "ErrorResponse": error_response_schema(),
                "Envelope": {
                    "type": "object",
                    "properties": {
                        "status": { "type": "integer" },
                        "transaction": { "type": "string", "example": "Successful" }
                    },
                    "required": ["status", "transaction"]
                }
            }
        }
    });

    for module in registry.modules() {
        let name = module.name();
        document["paths"][format!("/api/{name}/health")] = json!({
            "get": {
                "summary": format!("{name} module health check"),
                "tags": [name],
                "responses": {
                    "200": { "description": "OK" },
                    "500": error_reference("Module probe failed")
                }
            }
        });

        let Some(fragment) = module.openapi() else {
            continue;
        };

        if let Some(paths) = fragment.get("paths").and_then(Value::as_object) {
            for (path, item) in paths {
                let prefixed = format!("/api/{name}{}", path.trim_end_matches('/'));
                document["paths"][prefixed] = item.clone();
            }
        }

        if let Some(schemas) = fragment
            .get("components")
            .and_then(|components| components.get("schemas"))
            .and_then(Value::as_object)
        {
            for (schema_name, schema) in schemas {
                document["components"]["schemas"][schema_name] = schema.clone();
            }
        }
    }

    document
}

/// `{"description", "content": ErrorResponse}` for use in module fragments.
pub fn error_reference(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn error_response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "error": {
                "type": "object",
                "properties": {
                    "code": { "type": "string" },
                    "message": { "type": "string" },
                    "details": { "type": "array", "items": {} },
                    "trace_id": { "type": "string" },
                    "timestamp": { "type": "string" }
                },
                "required": ["code", "message", "trace_id", "timestamp"]
            }
        },
        "required": ["error"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Fragmented;

    #[async_trait::async_trait]
    impl quill_kernel::Module for Fragmented {
        fn name(&self) -> &'static str {
            "shelf"
        }

        fn openapi(&self) -> Option<Value> {
            Some(json!({
                "paths": {
                    "/": { "get": { "summary": "List" } },
                    "/{id}": { "get": { "summary": "One" } }
                },
                "components": { "schemas": { "Shelf": { "type": "object" } } }
            }))
        }
    }

    #[test]
    fn module_paths_are_prefixed_and_schemas_merged() {
        let mut registry = ModuleRegistry::new();
        registry.register_custom(Arc::new(Fragmented));

        let document = merged_document(&registry);
        let paths = document["paths"].as_object().unwrap();
        assert!(paths.contains_key("/api/shelf"));
        assert!(paths.contains_key("/api/shelf/{id}"));
        assert!(paths.contains_key("/api/shelf/health"));
        assert!(paths.contains_key("/healthz"));
        assert!(document["components"]["schemas"]["Shelf"].is_object());
        assert!(document["components"]["schemas"]["ErrorResponse"].is_object());
    }
}
