//! Case-insensitive substring matching helpers shared by the search queries.
//!
//! User text is always lowercased and LIKE-escaped on the Rust side and bound
//! as a parameter; the SQL side compares against `LOWER(column)`.

/// ## Summary
/// Escapes special SQL LIKE pattern characters.
///
/// Escapes `%`, `_`, and `\` so they match literally under Postgres' default
/// `\` escape character.
#[must_use]
pub fn escape_like_pattern(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' | '_' | '\\' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

/// ## Summary
/// Builds the bound value for a case-insensitive substring match.
///
/// `"Acme_Co"` becomes `"%acme\_co%"`.
#[must_use]
pub fn contains_pattern(value: &str) -> String {
    format!("%{}%", escape_like_pattern(&value.to_lowercase()))
}

/// ## Summary
/// Renders `column` in the same shape [`contains_pattern`] produces.
///
/// Comparing the result with `=` against a contains-pattern placeholder is
/// true exactly when the lowercased column equals the searched text, which
/// lets relevance ordering reuse the free-text parameter.
#[must_use]
pub fn contains_pattern_sql(column: &str) -> String {
    format!(
        r"'%' || REPLACE(REPLACE(REPLACE(LOWER({column}), '\', '\\'), '%', '\%'), '_', '\_') || '%'"
    )
}
