use ns_core::Article;

/// Keep the articles whose title contains `keyword`, ignoring case.
///
/// Order is preserved and nothing is deduplicated. An empty keyword keeps
/// every article.
pub fn filter_articles(articles: &[Article], keyword: &str) -> Vec<Article> {
    let keyword = keyword.to_lowercase();
    articles
        .iter()
        .filter(|article| article.title.to_lowercase().contains(&keyword))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn articles() -> Vec<Article> {
        vec![
            Article::new("Acme Recall widens", "https://example.com/1"),
            Article::new("Acme earnings beat", "https://example.com/recall"),
            Article::new("Regulators probe RECALL process", "https://example.com/3"),
            Article::new("Acme Recall widens", "https://example.com/4"),
        ]
    }

    #[test]
    fn test_filter_matches_title_case_insensitively() {
        let filtered = filter_articles(&articles(), "recall");
        let links: Vec<_> = filtered.iter().map(|a| a.link.as_str()).collect();
        assert_eq!(
            links,
            vec!["https://example.com/1", "https://example.com/3", "https://example.com/4"]
        );
    }

    #[test]
    fn test_filter_ignores_link() {
        let filtered = filter_articles(&articles(), "earnings");
        assert_eq!(filtered.len(), 1);
        assert!(filter_articles(&articles(), "example.com").is_empty());
    }

    #[test]
    fn test_filter_is_order_preserving_subsequence() {
        let input = articles();
        for keyword in ["acme", "RECALL", "widens", "zzz", "e"] {
            let filtered = filter_articles(&input, keyword);
            let mut cursor = input.iter();
            for article in &filtered {
                assert!(article.title.to_lowercase().contains(&keyword.to_lowercase()));
                assert!(cursor.any(|candidate| candidate == article));
            }
        }
    }

    #[test]
    fn test_empty_keyword_is_identity() {
        assert_eq!(filter_articles(&articles(), ""), articles());
    }
}
