//! Collaborator service endpoints

use serde::Deserialize;

use super::error::ValidationError;

/// Base URLs of the collaborator services.
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    /// Schema parser service (form generation, element trees, rendering)
    pub parser_url: String,

    /// Host CMS (Data/Template CRUD, advisory locks)
    pub core_url: String,
}

impl ServicesConfig {
    /// Validate service endpoints
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, url) in [("parser_url", &self.parser_url), ("core_url", &self.core_url)] {
            if url.is_empty() {
                return Err(ValidationError::MissingRequired(match name {
                    "parser_url" => "CURATE__SERVICES__PARSER_URL",
                    _ => "CURATE__SERVICES__CORE_URL",
                }));
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidServiceUrl);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_urls_are_accepted() {
        let config = ServicesConfig {
            parser_url: "http://parser:8080".to_string(),
            core_url: "https://cms.example.org".to_string(),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_http_url_is_rejected() {
        let config = ServicesConfig {
            parser_url: "ftp://parser".to_string(),
            core_url: "https://cms.example.org".to_string(),
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidServiceUrl)
        ));
    }
}
