//! Built-in model catalog
//!
//! The catalog lists well-known gateway models grouped by provider and tier.
//! It backs `pantheon models`, lets `config set-models` accept short names,
//! and supplies the fallback roster when no valid configuration exists.

use super::model::ModelEntry;

/// Capability tier of a catalog model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    Frontier,
    Flash,
}

impl ModelTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelTier::Frontier => "frontier",
            ModelTier::Flash => "flash",
        }
    }
}

impl std::fmt::Display for ModelTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry with static strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogModel {
    pub name: &'static str,
    pub model_id: &'static str,
}

impl CatalogModel {
    const fn new(name: &'static str, model_id: &'static str) -> Self {
        Self { name, model_id }
    }

    pub fn to_entry(&self) -> ModelEntry {
        ModelEntry::new(self.name, self.model_id)
    }
}

/// Models of one provider in one tier
#[derive(Debug, Clone, Copy)]
pub struct ModelGroup {
    pub provider: &'static str,
    pub tier: ModelTier,
    pub models: &'static [CatalogModel],
}

pub const MODEL_CATALOG: &[ModelGroup] = &[
    ModelGroup {
        provider: "Anthropic",
        tier: ModelTier::Frontier,
        models: &[
            CatalogModel::new("opus-4.6", "anthropic/claude-opus-4-6"),
            CatalogModel::new("sonnet-4.5", "anthropic/claude-sonnet-4-5"),
            CatalogModel::new("opus-4.5", "anthropic/claude-opus-4-5"),
        ],
    },
    ModelGroup {
        provider: "Anthropic",
        tier: ModelTier::Flash,
        models: &[
            CatalogModel::new("haiku-4.5", "anthropic/claude-haiku-4-5"),
            CatalogModel::new("sonnet-4.0", "anthropic/claude-sonnet-4-0"),
            CatalogModel::new("haiku-3.5", "anthropic/claude-3-5-haiku-latest"),
        ],
    },
    ModelGroup {
        provider: "OpenAI",
        tier: ModelTier::Frontier,
        models: &[
            CatalogModel::new("gpt-5.2", "openai/gpt-5.2"),
            CatalogModel::new("gpt-5.1", "openai/gpt-5.1"),
            CatalogModel::new("gpt-5", "openai/gpt-5"),
        ],
    },
    ModelGroup {
        provider: "OpenAI",
        tier: ModelTier::Flash,
        models: &[
            CatalogModel::new("gpt-5-mini", "openai/gpt-5-mini"),
            CatalogModel::new("gpt-4.1-mini", "openai/gpt-4.1-mini"),
            CatalogModel::new("gpt-4.1-nano", "openai/gpt-4.1-nano"),
        ],
    },
    ModelGroup {
        provider: "Google",
        tier: ModelTier::Frontier,
        models: &[
            CatalogModel::new("gemini-3-pro", "google/gemini-3-pro-preview"),
            CatalogModel::new("gemini-2.5-pro", "google/gemini-2.5-pro"),
            CatalogModel::new("gemini-1.5-pro", "google/gemini-1.5-pro"),
        ],
    },
    ModelGroup {
        provider: "Google",
        tier: ModelTier::Flash,
        models: &[
            CatalogModel::new("gemini-3-flash", "google/gemini-3-flash-preview"),
            CatalogModel::new("gemini-2.5-flash", "google/gemini-2.5-flash"),
            CatalogModel::new("gemini-2.0-flash", "google/gemini-2.0-flash"),
        ],
    },
];

/// One flagship per provider
pub const DEFAULT_SELECTION: &[&str] = &["opus-4.6", "gpt-5.2", "gemini-3-pro"];

/// Iterate every catalog model together with its group
pub fn all_models() -> impl Iterator<Item = (&'static ModelGroup, &'static CatalogModel)> {
    MODEL_CATALOG
        .iter()
        .flat_map(|group| group.models.iter().map(move |m| (group, m)))
}

/// Look up a catalog model by display name
pub fn find_by_name(name: &str) -> Option<ModelEntry> {
    all_models()
        .find(|(_, m)| m.name == name)
        .map(|(_, m)| m.to_entry())
}

/// Fallback roster used when no valid configuration exists
pub fn default_models() -> Vec<ModelEntry> {
    DEFAULT_SELECTION.iter().filter_map(|n| find_by_name(n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size() {
        assert_eq!(all_models().count(), 18);
    }

    #[test]
    fn test_default_models_are_the_flagship_triple() {
        let models = default_models();
        let names: Vec<_> = models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["opus-4.6", "gpt-5.2", "gemini-3-pro"]);
        assert!(ModelEntry::validate_roster(&models).is_ok());
    }

    #[test]
    fn test_find_by_name() {
        let m = find_by_name("haiku-4.5").unwrap();
        assert_eq!(m.model_id, "anthropic/claude-haiku-4-5");
        assert!(find_by_name("unknown").is_none());
    }

    #[test]
    fn test_catalog_names_unique() {
        let mut names: Vec<_> = all_models().map(|(_, m)| m.name).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
