//! Catalog loading and cross-reference validation.
//!
//! Catalogs deserialize from YAML or JSON. Validation runs after parsing and
//! rejects catalogs whose id references dangle, so the engines can rely on
//! "unknown id" being a caller mistake rather than broken data.

use std::path::Path;

use crate::error::CatalogError;

use super::ContentCatalog;

impl ContentCatalog {
    /// Parse and validate a catalog from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let catalog: ContentCatalog = serde_yaml::from_str(yaml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse and validate a catalog from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml(&raw)
    }

    /// Parse and validate a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: ContentCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check every cross-reference in the catalog.
    ///
    /// Rules:
    /// - anchor content must be keyed by its own situation id, and that
    ///   situation must exist;
    /// - module maps must be keyed by the module's own id;
    /// - every option vote, tiebreaker entry, and candidate-pool entry must
    ///   name a known archetype;
    /// - every module's tiebreaker must be non-empty (it doubles as the
    ///   module fallback).
    pub fn validate(&self) -> Result<(), CatalogError> {
        for (key, content) in &self.anchor_contents {
            if key != &content.situation || key != &content.id {
                return Err(CatalogError::Validation(format!(
                    "anchor content '{}' is keyed under '{}'",
                    content.id, key
                )));
            }
            if !self.has_situation(key) {
                return Err(CatalogError::Validation(format!(
                    "anchor content references unknown situation '{key}'"
                )));
            }
        }

        for (key, module) in &self.modules {
            if key != &module.id {
                return Err(CatalogError::Validation(format!(
                    "module '{}' is keyed under '{}'",
                    module.id, key
                )));
            }
            if module.tiebreaker.is_empty() {
                return Err(CatalogError::Validation(format!(
                    "module '{}' has an empty tiebreaker list",
                    module.id
                )));
            }
            let pools = module
                .tiebreaker
                .iter()
                .chain(&module.primary_archetypes)
                .chain(&module.secondary_archetypes);
            for id in pools {
                if !self.archetypes.contains_key(id) {
                    return Err(CatalogError::Validation(format!(
                        "module '{}' references unknown archetype '{id}'",
                        module.id
                    )));
                }
            }
            for question in &module.questions {
                for option in &question.options {
                    if !self.archetypes.contains_key(&option.archetype) {
                        return Err(CatalogError::Validation(format!(
                            "option '{}' of question '{}' votes for unknown archetype '{}'",
                            option.id, question.id, option.archetype
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::builtin_catalog;
    use super::*;

    fn sample_yaml() -> String {
        // Round-trip the builtin catalog so the YAML shape stays in sync
        // with the type definitions.
        serde_yaml::to_string(builtin_catalog()).unwrap()
    }

    #[test]
    fn test_yaml_round_trip() {
        let catalog = ContentCatalog::from_yaml(&sample_yaml()).unwrap();
        assert_eq!(catalog.situations.len(), 4);
        assert_eq!(catalog.modules.len(), 3);
        assert_eq!(
            catalog.module("hesitation").unwrap().tiebreaker[0],
            "overthinker"
        );
    }

    #[test]
    fn test_json_round_trip() {
        let json = serde_json::to_string(builtin_catalog()).unwrap();
        let catalog = ContentCatalog::from_json(&json).unwrap();
        assert!(catalog.archetype("carrier").is_some());
    }

    #[test]
    fn test_rejects_dangling_vote() {
        let mut catalog = builtin_catalog().clone();
        catalog
            .modules
            .get_mut("hesitation")
            .unwrap()
            .questions[0]
            .options[0]
            .archetype = "ghost".to_string();
        let err = catalog.validate().unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_rejects_empty_tiebreaker() {
        let mut catalog = builtin_catalog().clone();
        catalog.modules.get_mut("shutdown").unwrap().tiebreaker = vec![];
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_rejects_mismatched_content_key() {
        let mut catalog = builtin_catalog().clone();
        let content = catalog.anchor_contents.remove("numb").unwrap();
        catalog.anchor_contents.insert("mislabeled".to_string(), content);
        assert!(catalog.validate().is_err());
    }
}
