// src/scope/spec_files.rs

use std::collections::HashSet;

/// Map a changed file to its spec file.
///
/// Spec files map to themselves, so applying this twice is the same as
/// applying it once. Paths without the source suffix pass through unchanged.
pub fn to_spec_path(path: &str, source_suffix: &str, spec_suffix: &str) -> String {
    if path.ends_with(spec_suffix) {
        return path.to_string();
    }
    match path.strip_suffix(source_suffix) {
        Some(stem) => format!("{stem}{spec_suffix}"),
        None => path.to_string(),
    }
}

/// Map every changed file to its spec file, dropping duplicates.
///
/// The first occurrence of each spec path wins; later duplicates add nothing.
pub fn convert_to_spec_files<S: AsRef<str>>(
    paths: &[S],
    source_suffix: &str,
    spec_suffix: &str,
) -> Vec<String> {
    let mut seen = HashSet::new();
    paths
        .iter()
        .map(|p| to_spec_path(p.as_ref(), source_suffix, spec_suffix))
        .filter(|spec| seen.insert(spec.clone()))
        .collect()
}
