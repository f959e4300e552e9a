/// A person name part in the form it is stored in the database:
/// trimmed and lower-cased, so "  Han" and "HAN" end up as the same row.
///
/// Repositories only accept this type for `firstname` / `lastname`, which
/// makes it impossible to write a name that skipped normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedName(String);

impl NormalizedName {
    /// # Examples
    ///
    /// ```
    /// use storage::models::NormalizedName;
    ///
    /// let name = NormalizedName::new("  Han ");
    /// assert_eq!(name.as_str(), "han");
    /// ```
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
