//! Canonical field resolution
//!
//! Every canonical field owns an ordered list of header spellings it accepts. For each row the
//! first spelling holding a non-empty value wins. Matching is exact per spelling; only the listed
//! variants are tried, so `EMAIL` does not resolve to `email`.

use super::RawRow;

/// One of the four attributes every accepted header spelling resolves into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    PostId,
    Name,
    Email,
    Body,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 4] = [
        CanonicalField::PostId,
        CanonicalField::Name,
        CanonicalField::Email,
        CanonicalField::Body,
    ];

    /// Persisted column name
    pub fn column(self) -> &'static str {
        match self {
            CanonicalField::PostId => "post_id",
            CanonicalField::Name => "name",
            CanonicalField::Email => "email",
            CanonicalField::Body => "body",
        }
    }
}

/// Ordered header spellings accepted for a canonical field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAliases {
    pub field: CanonicalField,
    pub aliases: &'static [&'static str],
}

/// Accepted spellings, highest priority first.
///
/// The order is part of the upload contract: files exported with both `postId` and `id`
/// columns take the post identifier from `postId`.
pub const DEFAULT_ALIASES: [FieldAliases; 4] = [
    FieldAliases {
        field: CanonicalField::PostId,
        aliases: &["postId", "post_id", "Id", "id"],
    },
    FieldAliases {
        field: CanonicalField::Name,
        aliases: &["name", "Name"],
    },
    FieldAliases {
        field: CanonicalField::Email,
        aliases: &["email", "Email"],
    },
    FieldAliases {
        field: CanonicalField::Body,
        aliases: &["body", "Body"],
    },
];

/// A row after field resolution, before coercion
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MappedRow {
    /// Absent when no accepted spelling holds a value; defaulted by the record builder
    pub post_id: Option<String>,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// Resolves canonical fields from a cleaned row using an alias table
#[derive(Debug, Clone)]
pub struct FieldMapper {
    table: Vec<FieldAliases>,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new(DEFAULT_ALIASES.to_vec())
    }
}

impl FieldMapper {
    pub fn new(table: Vec<FieldAliases>) -> Self {
        Self { table }
    }

    /// Accepted spellings for `field`, in priority order
    pub fn aliases(&self, field: CanonicalField) -> &[&'static str] {
        self.table
            .iter()
            .find(|entry| entry.field == field)
            .map(|entry| entry.aliases)
            .unwrap_or(&[])
    }

    /// First non-empty value in `row` stored under one of `field`'s spellings
    pub fn resolve<'r>(&self, row: &'r RawRow, field: CanonicalField) -> Option<&'r str> {
        self.aliases(field)
            .iter()
            .find_map(|alias| row.get(*alias).filter(|value| !value.is_empty()))
            .map(String::as_str)
    }

    pub fn map_row(&self, row: &RawRow) -> MappedRow {
        let text = |field| self.resolve(row, field).unwrap_or_default().to_string();

        MappedRow {
            post_id: self.resolve(row, CanonicalField::PostId).map(str::to_string),
            name: text(CanonicalField::Name),
            email: text(CanonicalField::Email),
            body: text(CanonicalField::Body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_each_post_id_spelling_resolves() {
        let mapper = FieldMapper::default();
        for alias in ["postId", "post_id", "Id", "id"] {
            let mapped = mapper.map_row(&row(&[(alias, "42")]));
            assert_eq!(mapped.post_id.as_deref(), Some("42"), "alias = {}", alias);
        }
    }

    #[test]
    fn test_text_field_spellings_resolve() {
        let mapper = FieldMapper::default();
        let mapped = mapper.map_row(&row(&[
            ("Name", "Alice"),
            ("Email", "a@x.com"),
            ("Body", "hello"),
        ]));
        assert_eq!(mapped.name, "Alice");
        assert_eq!(mapped.email, "a@x.com");
        assert_eq!(mapped.body, "hello");
    }

    #[test]
    fn test_priority_order_wins() {
        let mapper = FieldMapper::default();
        let mapped = mapper.map_row(&row(&[
            ("id", "4"),
            ("Id", "3"),
            ("post_id", "2"),
            ("postId", "1"),
            ("Name", "second"),
            ("name", "first"),
        ]));
        assert_eq!(mapped.post_id.as_deref(), Some("1"));
        assert_eq!(mapped.name, "first");

        let mapped = mapper.map_row(&row(&[("id", "4"), ("Id", "3")]));
        assert_eq!(mapped.post_id.as_deref(), Some("3"));
    }

    #[test]
    fn test_empty_value_falls_through_to_next_spelling() {
        let mapper = FieldMapper::default();
        let mapped = mapper.map_row(&row(&[
            ("postId", ""),
            ("id", "9"),
            ("name", ""),
            ("Name", "Bob"),
        ]));
        assert_eq!(mapped.post_id.as_deref(), Some("9"));
        assert_eq!(mapped.name, "Bob");

        let mapped = mapper.map_row(&row(&[("postId", ""), ("email", "")]));
        assert_eq!(mapped.post_id, None);
        assert_eq!(mapped.email, "");
    }

    #[test]
    fn test_missing_fields_default() {
        let mapper = FieldMapper::default();
        let mapped = mapper.map_row(&row(&[("unrelated", "x")]));
        assert_eq!(mapped, MappedRow::default());
        assert_eq!(mapped.post_id, None);
    }

    #[test]
    fn test_unlisted_case_variants_are_ignored() {
        let mapper = FieldMapper::default();
        let mapped = mapper.map_row(&row(&[
            ("EMAIL", "a@x.com"),
            ("POSTID", "1"),
            ("nAme", "Alice"),
        ]));
        assert_eq!(mapped.email, "");
        assert_eq!(mapped.post_id, None);
        assert_eq!(mapped.name, "");
    }

    #[test]
    fn test_alias_table_is_inspectable() {
        let mapper = FieldMapper::default();
        assert_eq!(
            mapper.aliases(CanonicalField::PostId),
            &["postId", "post_id", "Id", "id"]
        );
        assert_eq!(mapper.aliases(CanonicalField::Body), &["body", "Body"]);
    }

    #[test]
    fn test_custom_table() {
        let mapper = FieldMapper::new(vec![FieldAliases {
            field: CanonicalField::Email,
            aliases: &["mail"],
        }]);
        let mapped = mapper.map_row(&row(&[("mail", "m@x.com"), ("email", "ignored")]));
        assert_eq!(mapped.email, "m@x.com");
        assert!(mapper.aliases(CanonicalField::Name).is_empty());
    }

    #[test]
    fn test_column_names() {
        let columns: Vec<_> = CanonicalField::ALL.iter().map(|f| f.column()).collect();
        assert_eq!(columns, vec!["post_id", "name", "email", "body"]);
    }
}
