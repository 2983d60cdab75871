pub mod category_service;
pub mod collection_service;
pub mod product_service;
pub mod rarity_service;
pub mod rating_service;
pub mod status_service;

/// `ILIKE` pattern matching `text` anywhere, with its wildcards taken literally.
pub(crate) fn contains_pattern(text: &str) -> String {
    format!("%{}%", escape_like(text))
}

/// `ILIKE` pattern matching values that start with `text`.
pub(crate) fn prefix_pattern(text: &str) -> String {
    format!("{}%", escape_like(text))
}

// Backslash is Postgres' default LIKE escape character.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_wrapped_unchanged() {
        assert_eq!(contains_pattern("char"), "%char%");
        assert_eq!(prefix_pattern("Base"), "Base%");
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(contains_pattern("_"), "%\\_%");
        assert_eq!(contains_pattern("50%"), "%50\\%%");
        assert_eq!(prefix_pattern("a\\b"), "a\\\\b%");
    }
}
