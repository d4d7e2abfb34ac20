// src/scope/pattern.rs

use std::fmt;
use std::path::Path;

/// Characters that carry meaning in a regex literal.
const META_CHARS: &[char] = &[
    '.', '*', '+', '?', '^', '$', '{', '}', '(', ')', '/', '|', '[', ']', '\\',
];

/// A regex literal (`/.../`) written verbatim into a test entry file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern(String);

impl Pattern {
    /// Scoped form: an alternation of the escaped base names of `files`.
    ///
    /// `["app/foo.spec.ts", "app/bar.spec.ts"]` becomes
    /// `/(foo\.spec\.ts|bar\.spec\.ts)/`.
    pub fn for_files<S: AsRef<str>>(files: &[S]) -> Self {
        let alternation = files
            .iter()
            .map(|f| escape_file_name(base_name(f.as_ref())))
            .collect::<Vec<_>>()
            .join("|");
        Pattern(format!("/({alternation})/"))
    }

    /// Default form: matches any file ending in `spec_suffix`.
    ///
    /// For `.spec.ts` this is `/\.spec\.ts$/`.
    pub fn default_for(spec_suffix: &str) -> Self {
        Pattern(format!("/{}$/", escape_file_name(spec_suffix)))
    }

    /// The literal as written into the file, delimiters included.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The expression between the `/` delimiters.
    pub fn source(&self) -> &str {
        self.0
            .strip_prefix('/')
            .and_then(|s| s.strip_suffix('/'))
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Backslash-escape every regex metacharacter in `name`.
pub fn escape_file_name(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len() * 2);
    for c in name.chars() {
        if META_CHARS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn base_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn escapes_every_metachar() {
        assert_eq!(
            escape_file_name(r".*+?^${}()/|[]\"),
            r"\.\*\+\?\^\$\{\}\(\)\/\|\[\]\\"
        );
        assert_eq!(escape_file_name("plain-name_1"), "plain-name_1");
    }

    #[test]
    fn scoped_pattern_uses_base_names() {
        let p = Pattern::for_files(&["app/src/foo.spec.ts", "app/src/lib/bar.spec.ts"]);
        assert_eq!(p.as_str(), r"/(foo\.spec\.ts|bar\.spec\.ts)/");
    }

    #[test]
    fn escaped_pattern_matches_only_the_literal_name() {
        let p = Pattern::for_files(&["x/a.b+c.spec.ts"]);
        assert!(p.as_str().contains(r"a\.b\+c"));

        let re = Regex::new(p.source()).unwrap();
        assert!(re.is_match("./x/a.b+c.spec.ts"));
        assert!(!re.is_match("./x/aXbYc.spec.ts"));
    }

    #[test]
    fn default_pattern_matches_any_spec() {
        let p = Pattern::default_for(".spec.ts");
        assert_eq!(p.as_str(), r"/\.spec\.ts$/");

        let re = Regex::new(p.source()).unwrap();
        assert!(re.is_match("./a/b/widget.spec.ts"));
        assert!(!re.is_match("./a/b/widget.ts"));
    }
}
