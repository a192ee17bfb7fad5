//! Schema parser behavior flags
//!
//! Sent to the parser service with every form-generation request. The
//! defaults reproduce the standard curation behavior; deployments override
//! them through the environment (`CURATE__PARSER__MIN_TREE=false`, ...).

use serde::{Deserialize, Serialize};

/// Parser behavior flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Generate only the minimal tree (required elements).
    #[serde(default = "default_true")]
    pub min_tree: bool,

    /// Skip module resolution while generating.
    #[serde(default)]
    pub ignore_modules: bool,

    /// Collapse empty branches in the generated form.
    #[serde(default = "default_true")]
    pub collapse: bool,

    /// Automatically handle key/keyref pairs.
    #[serde(default)]
    pub auto_key_keyref: bool,

    /// Treat extension bases as implicit when absent.
    #[serde(default)]
    pub implicit_extension_base: bool,

    /// Download schema dependencies while parsing.
    #[serde(default)]
    pub download_dependencies: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            min_tree: true,
            ignore_modules: false,
            collapse: true,
            auto_key_keyref: false,
            implicit_extension_base: false,
            download_dependencies: false,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_standard_behavior() {
        let config = ParserConfig::default();
        assert!(config.min_tree);
        assert!(config.collapse);
        assert!(!config.ignore_modules);
        assert!(!config.download_dependencies);
    }

    #[test]
    fn flags_serialize_flat() {
        let json = serde_json::to_string(&ParserConfig::default()).unwrap();
        assert!(json.contains("\"min_tree\":true"));
        assert!(json.contains("\"collapse\":true"));
    }
}
