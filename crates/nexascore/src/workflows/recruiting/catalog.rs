use serde::{Deserialize, Serialize};

use super::domain::{Skill, SkillId};

/// Collapses internal whitespace and trims a skill name for display.
pub(crate) fn normalize_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn lookup_key(name: &str) -> String {
    normalize_name(name).to_lowercase()
}

/// In-memory skill catalog with unique, case-insensitive names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillCatalog {
    skills: Vec<Skill>,
}

impl SkillCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn find(&self, name: &str) -> Option<&Skill> {
        let key = lookup_key(name);
        self.skills
            .iter()
            .find(|skill| lookup_key(&skill.name) == key)
    }

    /// Returns the existing entry for `name`, registering it first when unknown.
    ///
    /// Blank names yield `None`.
    pub fn intern(&mut self, name: &str) -> Option<Skill> {
        let normalized = normalize_name(name);
        if normalized.is_empty() {
            return None;
        }

        if let Some(existing) = self.find(&normalized) {
            return Some(existing.clone());
        }

        let next_id = self
            .skills
            .iter()
            .map(|skill| skill.id.0)
            .max()
            .unwrap_or(0)
            + 1;
        let skill = Skill {
            id: SkillId(next_id),
            name: normalized,
        };
        self.skills.push(skill.clone());
        Some(skill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_reuses_entries_case_insensitively() {
        let mut catalog = SkillCatalog::new();
        let rust = catalog.intern("Rust").expect("registered");
        let again = catalog.intern("  rust ").expect("found");
        let sql = catalog.intern("PostgreSQL  SQL").expect("registered");

        assert_eq!(rust, again);
        assert_eq!(sql.id, SkillId(2));
        assert_eq!(sql.name, "PostgreSQL SQL");
        assert_eq!(catalog.skills().len(), 2);
    }

    #[test]
    fn blank_names_are_not_registered() {
        let mut catalog = SkillCatalog::new();
        assert!(catalog.intern("   ").is_none());
        assert!(catalog.skills().is_empty());
    }
}
