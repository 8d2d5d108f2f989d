use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Identifier of a content template.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TemplateId {
    #[default]
    TechInsight,
    StartupStory,
    ProductLaunch,
    IndustryUpdate,
}

impl TemplateId {
    /// Returns the static descriptor for this template.
    pub fn descriptor(&self) -> &'static Template {
        // TEMPLATES holds exactly one entry per variant, in declaration order.
        &TEMPLATES[*self as usize]
    }
}

/// Read-only descriptor shown when choosing a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    pub id: TemplateId,
    pub label: &'static str,
    pub description: &'static str,
}

pub const TEMPLATES: [Template; 4] = [
    Template {
        id: TemplateId::TechInsight,
        label: "Tech Insight",
        description: "Share technology trends and insights",
    },
    Template {
        id: TemplateId::StartupStory,
        label: "Startup Story",
        description: "Tell your startup journey",
    },
    Template {
        id: TemplateId::ProductLaunch,
        label: "Product Launch",
        description: "Announce new products or features",
    },
    Template {
        id: TemplateId::IndustryUpdate,
        label: "Industry Update",
        description: "Share market trends and analysis",
    },
];

impl Template {
    pub fn all() -> &'static [Template] {
        &TEMPLATES
    }

    /// Looks up a template by its wire id (e.g. `"tech-insight"`).
    pub fn find(id: &str) -> Option<&'static Template> {
        id.parse::<TemplateId>().ok().map(|id| id.descriptor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_descriptor_matches_variant() {
        for id in TemplateId::iter() {
            assert_eq!(id.descriptor().id, id);
        }
    }

    #[test]
    fn test_find_by_wire_id() {
        let template = Template::find("product-launch").unwrap();
        assert_eq!(template.label, "Product Launch");
        assert!(Template::find("unknown").is_none());
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&TemplateId::StartupStory).unwrap();
        assert_eq!(json, "\"startup-story\"");
        assert_eq!(TemplateId::IndustryUpdate.to_string(), "industry-update");
    }
}
