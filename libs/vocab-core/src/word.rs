//! Word text normalization.

use crate::error::{CoreError, Result};

/// Title-case a user-entered word ("apple" -> "Apple", " NEW york " -> "New york").
pub fn normalize_word(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    let first = chars.next().ok_or(CoreError::EmptyWord)?;
    let mut word: String = first.to_uppercase().collect();
    word.push_str(&chars.as_str().to_lowercase());
    Ok(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_cases() {
        assert_eq!(normalize_word("apple").unwrap(), "Apple");
        assert_eq!(normalize_word("  bRIGHT ").unwrap(), "Bright");
        assert_eq!(normalize_word("état").unwrap(), "État");
    }

    #[test]
    fn rejects_blank() {
        assert_eq!(normalize_word("   "), Err(CoreError::EmptyWord));
    }
}
