//! Keyword taxonomy: technology category -> matchable term variants.
//!
//! Loaded once from YAML at startup and shared read-only by every matcher
//! invocation. Two shapes are accepted per category:
//!
//! ```yaml
//! lenguajes_programacion: [python, java, c++]
//! bases_datos:
//!   match: substring
//!   terms: [sql, oracle]
//! ```
//!
//! The short list form uses word-boundary matching; the long form lets a
//! category opt into substring matching (e.g. `sql` inside `postgresql`).

use crate::error::{Result, TechScanError};
use crate::normalize::normalize;
use std::collections::HashSet;
use std::path::Path;

/// How a category's variants are located in document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// A variant only counts when not embedded in a larger token.
    #[default]
    WordBoundary,
    /// A variant counts anywhere it appears, token boundaries ignored.
    Substring,
}

impl std::str::FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "word" | "word-boundary" => Ok(MatchPolicy::WordBoundary),
            "substring" => Ok(MatchPolicy::Substring),
            _ => Err(format!("unknown match policy: {}. Use word or substring", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    /// Normalized, deduplicated, in configuration order.
    pub variants: Vec<String>,
    pub policy: MatchPolicy,
}

/// Ordered, immutable set of keyword categories.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    categories: Vec<Category>,
}

impl Taxonomy {
    /// Load a taxonomy from a YAML file. Any malformed definition is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
            .map_err(|e| TechScanError::Taxonomy(format!("{}: {}", path.display(), e)))
    }

    /// Parse YAML taxonomy content. Returns a plain message on failure so
    /// callers can attach the source path.
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| format!("YAML parse error: {}", e))?;

        let mapping = match value {
            serde_yaml::Value::Mapping(m) => m,
            _ => return Err("document must be a mapping of category -> terms".into()),
        };

        let mut categories = Vec::with_capacity(mapping.len());
        let mut seen_names = HashSet::new();

        for (key, entry) in mapping {
            let name = match key {
                serde_yaml::Value::String(s) => s,
                other => return Err(format!("category name must be a string, got: {:?}", other)),
            };
            if !seen_names.insert(name.clone()) {
                return Err(format!("duplicate category: {}", name));
            }

            let (terms, policy) = parse_category_entry(&name, entry)?;
            categories.push(build_category(name, &terms, policy)?);
        }

        Ok(Taxonomy { categories })
    }

    /// The built-in Spanish IT taxonomy, used when no keywords file is given.
    pub fn default_set() -> Self {
        let categories = DEFAULT_KEYWORDS
            .iter()
            .map(|(name, terms)| {
                let owned: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
                build_category(name.to_string(), &owned, MatchPolicy::WordBoundary)
                    .expect("built-in taxonomy is well-formed")
            })
            .collect();
        Taxonomy { categories }
    }

    /// Render as YAML in the short list form, category order preserved.
    pub fn to_yaml_string(&self) -> Result<String> {
        let mut mapping = serde_yaml::Mapping::new();
        for category in &self.categories {
            let terms: Vec<serde_yaml::Value> = category
                .variants
                .iter()
                .map(|v| serde_yaml::Value::String(v.clone()))
                .collect();
            mapping.insert(
                serde_yaml::Value::String(category.name.clone()),
                serde_yaml::Value::Sequence(terms),
            );
        }
        serde_yaml::to_string(&mapping)
            .map_err(|e| TechScanError::Taxonomy(format!("YAML serialization error: {}", e)))
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn term_count(&self) -> usize {
        self.categories.iter().map(|c| c.variants.len()).sum()
    }
}

fn parse_category_entry(
    name: &str,
    entry: serde_yaml::Value,
) -> std::result::Result<(Vec<String>, MatchPolicy), String> {
    match entry {
        serde_yaml::Value::Sequence(seq) => Ok((string_sequence(name, seq)?, MatchPolicy::WordBoundary)),
        serde_yaml::Value::Mapping(map) => {
            let mut terms = None;
            let mut policy = MatchPolicy::WordBoundary;
            for (key, value) in map {
                match key.as_str() {
                    Some("terms") => match value {
                        serde_yaml::Value::Sequence(seq) => terms = Some(string_sequence(name, seq)?),
                        _ => return Err(format!("category {}: terms must be a list", name)),
                    },
                    Some("match") => {
                        let raw = value
                            .as_str()
                            .ok_or_else(|| format!("category {}: match must be a string", name))?;
                        policy = raw
                            .parse()
                            .map_err(|e| format!("category {}: {}", name, e))?;
                    }
                    Some(other) => return Err(format!("category {}: unknown key: {}", name, other)),
                    None => return Err(format!("category {}: keys must be strings", name)),
                }
            }
            let terms = terms.ok_or_else(|| format!("category {}: missing terms list", name))?;
            Ok((terms, policy))
        }
        _ => Err(format!("category {}: expected a list of terms or a terms/match mapping", name)),
    }
}

fn string_sequence(
    name: &str,
    seq: Vec<serde_yaml::Value>,
) -> std::result::Result<Vec<String>, String> {
    seq.into_iter()
        .map(|v| match v {
            serde_yaml::Value::String(s) => Ok(s),
            other => Err(format!("category {}: terms must be strings, got: {:?}", name, other)),
        })
        .collect()
}

/// Normalize and dedupe a category's terms. Empty categories and terms that
/// normalize to nothing are configuration errors.
fn build_category(
    name: String,
    terms: &[String],
    policy: MatchPolicy,
) -> std::result::Result<Category, String> {
    if terms.is_empty() {
        return Err(format!("category {}: empty variant list", name));
    }

    let mut variants = Vec::with_capacity(terms.len());
    let mut seen = HashSet::new();
    for term in terms {
        let normalized = normalize(term);
        if normalized.is_empty() {
            return Err(format!("category {}: variant normalizes to nothing: {:?}", name, term));
        }
        if seen.insert(normalized.clone()) {
            variants.push(normalized);
        }
    }

    Ok(Category { name, variants, policy })
}

/// Technology keywords observed across Spanish public-tender specification
/// documents, grouped the way the downstream report expects them.
const DEFAULT_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "lenguajes_programacion",
        &[
            "python", "java", "javascript", "typescript", "c#", "c++", "php", "ruby", "go",
            "rust", "scala", "kotlin", "swift", "cobol", "visual basic", "abap", "pl/sql",
        ],
    ),
    (
        "frameworks_web",
        &[
            "react", "angular", "vue.js", "django", "flask", "spring", "laravel", "symfony",
            "node.js", "jquery", "bootstrap", ".net",
        ],
    ),
    (
        "bases_datos",
        &[
            "mysql", "postgresql", "oracle", "sql server", "mongodb", "redis",
            "elasticsearch", "mariadb", "sqlite", "db2",
        ],
    ),
    (
        "sistemas_operativos",
        &[
            "windows", "linux", "ubuntu", "red hat", "debian", "centos", "suse", "macos",
            "android", "ios", "unix", "aix",
        ],
    ),
    (
        "cloud",
        &[
            "aws", "amazon web services", "azure", "google cloud", "gcp", "oracle cloud",
            "ibm cloud", "cloudflare",
        ],
    ),
    (
        "contenedores_orquestacion",
        &["docker", "kubernetes", "openshift", "helm", "podman", "rancher"],
    ),
    (
        "devops",
        &[
            "jenkins", "gitlab", "github", "azure devops", "ansible", "terraform", "puppet",
            "prometheus", "grafana", "sonarqube", "nexus",
        ],
    ),
    (
        "metodologias",
        &["agile", "scrum", "kanban", "itil", "cobit", "prince2", "metrica v3"],
    ),
    (
        "seguridad",
        &[
            "oauth", "saml", "ldap", "active directory", "ssl", "tls", "vpn", "firewall",
            "siem", "ens", "eidas", "dnie", "cl@ve",
        ],
    ),
    (
        "interoperabilidad",
        &[
            "soap", "rest", "api", "graphql", "webservice", "xml", "json", "sede electronica",
            "firma electronica", "@firma", "notifica",
        ],
    ),
];
