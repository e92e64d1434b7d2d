use once_cell::sync::Lazy;
use std::collections::BTreeSet;

/// Fixed vocabulary of recognized skill keywords. Lowercase by construction;
/// matching is pure substring containment, so "java" also matches inside
/// "javascript". That imprecision is intentional: scoring only needs
/// consistent overlap counting.
pub static SKILL_VOCABULARY: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    [
        "python",
        "java",
        "javascript",
        "typescript",
        "sql",
        "postgresql",
        "mysql",
        "mongodb",
        "fastapi",
        "django",
        "flask",
        "aws",
        "azure",
        "gcp",
        "cloud",
        "docker",
        "kubernetes",
        "api",
        "git",
        "linux",
    ]
    .into_iter()
    .collect()
});

/// Returns the subset of the vocabulary present in `text`, case-insensitive.
/// The result is ordered so downstream lists are deterministic.
pub fn extract_skills(text: &str) -> BTreeSet<&'static str> {
    let text = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| text.contains(*skill))
        .copied()
        .collect()
}
