//! Builder for Anki search queries.
//!
//! Every term is emitted fully quoted and escaped so it matches literally:
//! `\` and `"` are backslash-escaped, and the wildcards `*` and `_` are
//! escaped so they stand for themselves. Prefix terms add a single
//! unescaped `*` after the escaped prefix.
//!
//! # Example
//!
//! ```
//! use voxdeck_connect::QueryBuilder;
//!
//! let query = QueryBuilder::new()
//!     .deck("Spanish")
//!     .field("Front", "Hola")
//!     .build();
//!
//! assert_eq!(query, r#""deck:Spanish" "Front:Hola""#);
//! ```

/// A builder for constructing Anki search queries.
///
/// Terms are joined with spaces, which Anki treats as AND.
#[derive(Debug, Clone, Default)]
#[must_use = "QueryBuilder does nothing until .build() is called"]
pub struct QueryBuilder {
    parts: Vec<String>,
}

impl QueryBuilder {
    /// Create a new empty query builder.
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Restrict to notes in a deck (and its subdecks).
    ///
    /// ```
    /// use voxdeck_connect::QueryBuilder;
    ///
    /// let q = QueryBuilder::new().deck("My Deck").build();
    /// assert_eq!(q, r#""deck:My Deck""#);
    /// ```
    pub fn deck(mut self, name: &str) -> Self {
        self.parts.push(quoted_term("deck", name));
        self
    }

    /// Restrict to notes of a note type.
    pub fn note_type(mut self, model: &str) -> Self {
        self.parts.push(quoted_term("note", model));
        self
    }

    /// Restrict to notes carrying a tag.
    pub fn tag(mut self, tag: &str) -> Self {
        self.parts.push(quoted_term("tag", tag));
        self
    }

    /// Match notes whose field equals `text` exactly.
    ///
    /// Anki compares the whole field value; the match is case-insensitive
    /// for ASCII letters only and sensitive to surrounding whitespace.
    ///
    /// ```
    /// use voxdeck_connect::QueryBuilder;
    ///
    /// let q = QueryBuilder::new().field("Front", "say \"hi\"").build();
    /// assert_eq!(q, r#""Front:say \"hi\"""#);
    /// ```
    pub fn field(mut self, field_name: &str, text: &str) -> Self {
        self.parts.push(quoted_term(field_name, text));
        self
    }

    /// Match notes whose field starts with `prefix`.
    ///
    /// The prefix itself is escaped; only the trailing `*` is a wildcard.
    ///
    /// ```
    /// use voxdeck_connect::QueryBuilder;
    ///
    /// let q = QueryBuilder::new().field_starting_with("Front", "Hola [sound:").build();
    /// assert_eq!(q, r#""Front:Hola [sound:*""#);
    /// ```
    pub fn field_starting_with(mut self, field_name: &str, prefix: &str) -> Self {
        self.parts.push(prefix_term(field_name, prefix));
        self
    }

    /// Add raw query syntax verbatim.
    pub fn raw(mut self, query: &str) -> Self {
        self.parts.push(query.to_string());
        self
    }

    /// Combine conditions with OR.
    ///
    /// ```
    /// use voxdeck_connect::QueryBuilder;
    ///
    /// let q = QueryBuilder::new()
    ///     .deck("Spanish")
    ///     .or(|q| q.field("Front", "Hola").field("Front", "Olá"))
    ///     .build();
    /// assert_eq!(q, r#""deck:Spanish" ("Front:Hola" OR "Front:Olá")"#);
    /// ```
    pub fn or<F>(mut self, f: F) -> Self
    where
        F: FnOnce(OrBuilder) -> OrBuilder,
    {
        let group = f(OrBuilder::default()).build();
        if !group.is_empty() {
            self.parts.push(format!("({})", group));
        }
        self
    }

    /// Build the final query string.
    pub fn build(self) -> String {
        self.parts.join(" ")
    }
}

/// Builder for a group of alternatives inside [`QueryBuilder::or`].
#[derive(Debug, Clone, Default)]
pub struct OrBuilder {
    parts: Vec<String>,
}

impl OrBuilder {
    /// Add an exact field match to the group.
    pub fn field(mut self, field_name: &str, text: &str) -> Self {
        self.parts.push(quoted_term(field_name, text));
        self
    }

    /// Add a field prefix match to the group.
    pub fn field_starting_with(mut self, field_name: &str, prefix: &str) -> Self {
        self.parts.push(prefix_term(field_name, prefix));
        self
    }

    /// Add a tag to the group.
    pub fn tag(mut self, tag: &str) -> Self {
        self.parts.push(quoted_term("tag", tag));
        self
    }

    fn build(self) -> String {
        self.parts.join(" OR ")
    }
}

impl std::fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.parts.join(" "))
    }
}

fn quoted_term(key: &str, value: &str) -> String {
    format!("\"{}:{}\"", escape(key), escape(value))
}

fn prefix_term(key: &str, prefix: &str) -> String {
    format!("\"{}:{}*\"", escape(key), escape(prefix))
}

/// Escape characters that carry meaning inside a quoted search term.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '"' | '*' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query() {
        assert_eq!(QueryBuilder::new().build(), "");
    }

    #[test]
    fn test_deck_and_front() {
        let q = QueryBuilder::new()
            .deck("Spanish")
            .field("Front", "Hola")
            .build();
        assert_eq!(q, "\"deck:Spanish\" \"Front:Hola\"");
    }

    #[test]
    fn test_hierarchical_deck_with_spaces() {
        let q = QueryBuilder::new().deck("Languages::Spanish Verbs").build();
        assert_eq!(q, "\"deck:Languages::Spanish Verbs\"");
    }

    #[test]
    fn test_escapes_quotes_and_backslashes() {
        let q = QueryBuilder::new().field("Front", r#"a "b" \c"#).build();
        assert_eq!(q, r#""Front:a \"b\" \\c""#);
    }

    #[test]
    fn test_escapes_wildcards() {
        let q = QueryBuilder::new().field("Front", "qu_é*").build();
        assert_eq!(q, r#""Front:qu\_é\*""#);
    }

    #[test]
    fn test_value_with_colon() {
        let q = QueryBuilder::new().field("Front", "hora: 10:30").build();
        assert_eq!(q, "\"Front:hora: 10:30\"");
    }

    #[test]
    fn test_tag_and_note_type() {
        let q = QueryBuilder::new()
            .note_type("Basic")
            .tag("auto-gerado")
            .build();
        assert_eq!(q, "\"note:Basic\" \"tag:auto-gerado\"");
    }

    #[test]
    fn test_prefix_keeps_only_trailing_wildcard() {
        let q = QueryBuilder::new()
            .field_starting_with("Front", "a*b [sound:")
            .build();
        assert_eq!(q, r#""Front:a\*b [sound:*""#);
    }

    #[test]
    fn test_or_group() {
        let q = QueryBuilder::new()
            .deck("Spanish")
            .or(|q| {
                q.field("Front", "Hola")
                    .field_starting_with("Front", "Hola [sound:")
            })
            .build();
        assert_eq!(
            q,
            r#""deck:Spanish" ("Front:Hola" OR "Front:Hola [sound:*")"#
        );
    }

    #[test]
    fn test_empty_or_group_is_dropped() {
        let q = QueryBuilder::new().deck("Spanish").or(|q| q).build();
        assert_eq!(q, "\"deck:Spanish\"");
    }

    #[test]
    fn test_raw_and_display() {
        let builder = QueryBuilder::new().deck("Spanish").raw("is:new");
        assert_eq!(builder.to_string(), "\"deck:Spanish\" is:new");
        assert_eq!(builder.build(), "\"deck:Spanish\" is:new");
    }
}
