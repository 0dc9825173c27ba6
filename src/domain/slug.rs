use std::fmt;

/// A filesystem-safe folder name derived from a package identifier.
///
/// Guarantees:
/// - No spaces (replaced with underscores)
/// - No run of two or more consecutive periods (collapsed to one)
///
/// Derivation is idempotent: slugifying an existing slug is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// Derive a slug from a package identifier.
    pub fn from_identifier(identifier: &str) -> Self {
        let mut out = String::with_capacity(identifier.len());
        let mut prev_period = false;
        for ch in identifier.chars() {
            match ch {
                ' ' => {
                    out.push('_');
                    prev_period = false;
                }
                '.' => {
                    if !prev_period {
                        out.push('.');
                    }
                    prev_period = true;
                }
                other => {
                    out.push(other);
                    prev_period = false;
                }
            }
        }
        Slug(out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
