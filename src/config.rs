//! Settings for the type assertion pass.

/// Module names recognised as the runtime validation library.
pub const DEFAULT_LIBRARY_MODULES: [&str; 4] = ["tcomb", "tcomb-validation", "tcomb-react", "tcomb-form"];

/// Local name assumed for the library when a file does not import it.
pub const DEFAULT_ALIAS: &str = "t";

/// Base name of the local that captures a wrapped function's result.
pub const DEFAULT_RESULT_BINDING: &str = "ret";

#[derive(Debug, Clone, PartialEq)]
pub struct TransformConfig {
    /// An import from one of these modules rebinds the alias to its default binding.
    pub library_modules: Vec<String>,
    pub default_alias: String,
    pub result_binding: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        TransformConfig {
            library_modules: DEFAULT_LIBRARY_MODULES.iter().map(|name| name.to_string()).collect(),
            default_alias: String::from(DEFAULT_ALIAS),
            result_binding: String::from(DEFAULT_RESULT_BINDING),
        }
    }
}

impl TransformConfig {
    pub fn with_default_alias(mut self, alias: impl Into<String>) -> Self {
        self.default_alias = alias.into();
        self
    }

    pub fn with_library_module(mut self, module: impl Into<String>) -> Self {
        let module = module.into();
        if !self.is_library_module(&module) {
            self.library_modules.push(module);
        }
        self
    }

    pub fn is_library_module(&self, module: &str) -> bool {
        self.library_modules.iter().any(|name| name == module)
    }
}

#[cfg(test)]
mod tests {
    use super::TransformConfig;

    #[test]
    fn test_default_config() {
        let config = TransformConfig::default();

        assert_eq!(config.default_alias, "t");
        assert_eq!(config.result_binding, "ret");
        assert!(config.is_library_module("tcomb"));
        assert!(config.is_library_module("tcomb-form"));
        assert!(!config.is_library_module("lodash"));
    }

    #[test]
    fn test_extra_library_module() {
        let config = TransformConfig::default()
            .with_library_module("my-tcomb")
            .with_library_module("tcomb");

        assert!(config.is_library_module("my-tcomb"));
        assert_eq!(config.library_modules.len(), 5);
    }
}
