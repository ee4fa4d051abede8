use serde::Deserialize;

/// Ordered list of trusted anchor tokens.
///
/// Order is priority: the anchor walk stops at the first qualifying pair, so
/// entries earlier in the list win over more liquid pairs further down.
/// Addresses are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct Whitelist {
    tokens: Vec<String>,
}

impl Whitelist {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list: Vec<String> = Vec::new();
        for token in tokens {
            let token = token.as_ref().to_lowercase();
            // Keep the first occurrence; a repeat cannot change the scan result
            if !list.contains(&token) {
                list.push(token);
            }
        }
        Self { tokens: list }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t.eq_ignore_ascii_case(token))
    }

    /// Anchors in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl From<Vec<String>> for Whitelist {
    fn from(tokens: Vec<String>) -> Self {
        Self::new(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_order_and_drops_duplicates() {
        let list = Whitelist::new(["0xCCC", "0xaaa", "0xccc", "0xbbb"]);
        let order: Vec<&str> = list.iter().collect();
        assert_eq!(order, vec!["0xccc", "0xaaa", "0xbbb"]);
    }

    #[test]
    fn test_membership_ignores_case() {
        let list = Whitelist::new(["0xAbC"]);
        assert!(list.contains("0xabc"));
        assert!(list.contains("0xABC"));
        assert!(!list.contains("0xabd"));
    }
}
