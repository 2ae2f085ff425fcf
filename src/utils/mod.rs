/// Log prefix for a resource module, e.g. `quill::books`.
pub fn log_prefix(module: &str) -> String {
    format!("quill::{module}")
}

#[cfg(test)]
mod tests {
    #[test]
    fn prefix_names_the_module() {
        assert_eq!(super::log_prefix("todos"), "quill::todos");
    }
}
