use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error(
        "Profile '{name}' not found in configuration (available profiles: {})",
        list_or_none(.available)
    )]
    NotFound { name: String, available: Vec<String> },

    #[error("Invalid configuration in section '{section}': {message}")]
    Configuration { section: String, message: String },

    #[error("Configuration file is not valid TOML: {0}")]
    Syntax(#[from] toml::de::Error),

    #[error("I/O error reading configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl ProfileError {
    pub(crate) fn configuration(section: &str, message: impl Into<String>) -> Self {
        ProfileError::Configuration {
            section: section.to_string(),
            message: message.into(),
        }
    }
}

fn list_or_none(names: &[String]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}
