//! Guidance taxonomies: operating-system personas and structure profiles.
//!
//! The built-in tables are defined in `taxonomy.toml` and embedded in the
//! binary at compile time. A custom taxonomy file with the same shape can be
//! loaded instead. Lookups lowercase the key and never fail: an unknown
//! persona resolves to [`FALLBACK_PERSONA`], an unknown structure resolves to
//! the `fallback_structure` entry.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Persona used when a node's `os` is not in the taxonomy.
pub const FALLBACK_PERSONA: &str = "practical";

/// How a participant with a given persona is best communicated with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OsProfile {
    pub approach: String,
    pub delivery_method: String,
    #[serde(default)]
    pub key_strengths: Vec<String>,
}

/// What a protocol for a given structure should concentrate on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StructureProfile {
    pub focus: String,
    #[serde(default)]
    pub challenges: Vec<String>,
    #[serde(default)]
    pub priorities: Vec<String>,
}

/// A persona lookup result.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedPersona<'a> {
    /// The taxonomy key actually used (lowercased input, or the fallback).
    pub key: &'a str,
    pub profile: &'a OsProfile,
    /// True when the requested persona was unknown.
    pub fell_back: bool,
}

/// Errors from loading a taxonomy file.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to read taxonomy file {path:?}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("taxonomy must define the \"practical\" persona")]
    MissingFallbackPersona,

    #[error("duplicate {table} key after lowercasing: {key:?}")]
    DuplicateKey { table: &'static str, key: String },
}

/// The full set of lookup tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Taxonomy {
    os: BTreeMap<String, OsProfile>,
    #[serde(default)]
    structures: BTreeMap<String, StructureProfile>,
    fallback_structure: StructureProfile,
}

/// The embedded taxonomy TOML.
static TAXONOMY_TOML: &str = include_str!("taxonomy.toml");

static BUILTIN: LazyLock<Taxonomy> = LazyLock::new(|| {
    Taxonomy::from_toml_str(TAXONOMY_TOML).expect("embedded taxonomy.toml is invalid")
});

impl Taxonomy {
    /// The built-in taxonomy.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed. The file is compiled into
    /// the binary and covered by tests, so a release build always has a valid
    /// table.
    pub fn builtin() -> &'static Taxonomy {
        &BUILTIN
    }

    /// Parse and validate a taxonomy from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, TaxonomyError> {
        let raw: Taxonomy = toml::from_str(content)?;
        let os = lowercase_keys(raw.os, "os")?;
        let structures = lowercase_keys(raw.structures, "structures")?;

        if !os.contains_key(FALLBACK_PERSONA) {
            return Err(TaxonomyError::MissingFallbackPersona);
        }

        Ok(Self {
            os,
            structures,
            fallback_structure: raw.fallback_structure,
        })
    }

    /// Read and parse a taxonomy file from disk.
    pub fn load(path: &Path) -> Result<Self, TaxonomyError> {
        let content = std::fs::read_to_string(path).map_err(|e| TaxonomyError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolve an OS persona, falling back to [`FALLBACK_PERSONA`].
    pub fn os_profile(&self, os: &str) -> ResolvedPersona<'_> {
        let wanted = os.to_lowercase();
        if let Some((key, profile)) = self.os.get_key_value(&wanted) {
            return ResolvedPersona {
                key,
                profile,
                fell_back: false,
            };
        }

        tracing::debug!(os = %os, fallback = FALLBACK_PERSONA, "unknown OS persona");
        let (key, profile) = self
            .os
            .get_key_value(FALLBACK_PERSONA)
            .unwrap_or_else(|| unreachable!("fallback persona checked at load time"));
        ResolvedPersona {
            key,
            profile,
            fell_back: true,
        }
    }

    /// Resolve a structure profile, falling back to the generic entry.
    pub fn structure_profile(&self, structure: &str) -> &StructureProfile {
        match self.structures.get(&structure.to_lowercase()) {
            Some(profile) => profile,
            None => {
                tracing::debug!(structure = %structure, "unknown structure, using fallback profile");
                &self.fallback_structure
            }
        }
    }

    /// The generic profile used for unknown structures.
    pub fn fallback_structure(&self) -> &StructureProfile {
        &self.fallback_structure
    }

    /// All persona entries, sorted by key.
    pub fn personas(&self) -> impl Iterator<Item = (&str, &OsProfile)> {
        self.os.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All structure entries, sorted by key.
    pub fn structures(&self) -> impl Iterator<Item = (&str, &StructureProfile)> {
        self.structures.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn lowercase_keys<V>(
    table: BTreeMap<String, V>,
    name: &'static str,
) -> Result<BTreeMap<String, V>, TaxonomyError> {
    let mut out = BTreeMap::new();
    for (key, value) in table {
        let lower = key.to_lowercase();
        if out.insert(lower.clone(), value).is_some() {
            return Err(TaxonomyError::DuplicateKey {
                table: name,
                key: lower,
            });
        }
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_four_personas() {
        let keys: Vec<&str> = Taxonomy::builtin().personas().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["analytical", "emotional", "practical", "technical"]);
    }

    #[test]
    fn builtin_structures_include_known_contexts() {
        let keys: Vec<&str> = Taxonomy::builtin().structures().map(|(k, _)| k).collect();
        for expected in ["family-divorce", "family-intact", "work-team", "self"] {
            assert!(keys.contains(&expected), "missing structure {expected}");
        }
    }

    #[test]
    fn os_lookup_is_case_insensitive() {
        let tax = Taxonomy::builtin();
        let resolved = tax.os_profile("EmOtIoNaL");
        assert_eq!(resolved.key, "emotional");
        assert!(!resolved.fell_back);
    }

    #[test]
    fn unknown_os_falls_back_to_practical() {
        let tax = Taxonomy::builtin();
        let resolved = tax.os_profile("unknown-os-xyz");
        let practical = tax.os_profile("practical");
        assert_eq!(resolved.key, "practical");
        assert!(resolved.fell_back);
        assert_eq!(resolved.profile, practical.profile);
    }

    #[test]
    fn unknown_structure_uses_fallback() {
        let tax = Taxonomy::builtin();
        let profile = tax.structure_profile("space-station-crew");
        assert!(profile.focus.starts_with("System stabilization"));
        assert_eq!(profile, tax.fallback_structure());
    }

    #[test]
    fn structure_lookup_lowercases() {
        let tax = Taxonomy::builtin();
        let profile = tax.structure_profile("Family-Divorce");
        assert!(profile.focus.contains("Co-parenting"));
    }

    #[test]
    fn custom_taxonomy_requires_fallback_persona() {
        let content = r#"
[os.technical]
approach = "a"
delivery_method = "b"

[fallback_structure]
focus = "f"
"#;
        let err = Taxonomy::from_toml_str(content).unwrap_err();
        assert!(matches!(err, TaxonomyError::MissingFallbackPersona));
    }

    #[test]
    fn custom_taxonomy_rejects_case_collisions() {
        let content = r#"
[os.practical]
approach = "a"
delivery_method = "b"

[os.Practical]
approach = "c"
delivery_method = "d"

[fallback_structure]
focus = "f"
"#;
        let err = Taxonomy::from_toml_str(content).unwrap_err();
        assert!(matches!(err, TaxonomyError::DuplicateKey { table: "os", .. }));
    }

    #[test]
    fn custom_taxonomy_keys_are_lowercased() {
        let content = r#"
[os.Practical]
approach = "Just do it"
delivery_method = "Sticky notes"

[structures.Crew]
focus = "Crew focus"

[fallback_structure]
focus = "Generic"
"#;
        let tax = Taxonomy::from_toml_str(content).unwrap();
        assert_eq!(tax.os_profile("PRACTICAL").profile.approach, "Just do it");
        assert_eq!(tax.structure_profile("crew").focus, "Crew focus");
        assert!(tax.os_profile("practical").profile.key_strengths.is_empty());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Taxonomy::load(Path::new("/nonexistent/taxonomy.toml")).unwrap_err();
        assert!(matches!(err, TaxonomyError::Io { .. }));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("taxonomy.toml");
        std::fs::write(&path, TAXONOMY_TOML).unwrap();
        let tax = Taxonomy::load(&path).unwrap();
        assert_eq!(&tax, Taxonomy::builtin());
    }
}
