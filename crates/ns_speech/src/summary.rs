use ns_core::SentimentCounts;

/// Spoken one-sentence summary of the sentiment counts.
///
/// Only the primary language subtag is considered (`hi-IN` reads as `hi`);
/// languages without a template fall back to English.
pub fn summary_text(language: &str, company: &str, counts: &SentimentCounts, total: usize) -> String {
    let primary = language
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase();

    match primary.as_str() {
        "hi" => format!(
            "{} के बारे में {} समाचार लेख मिले। {} सकारात्मक, {} नकारात्मक, और {} तटस्थ लेख हैं।",
            company, total, counts.positive, counts.negative, counts.neutral
        ),
        _ => format!(
            "Found {} news articles about {}. {} positive, {} negative, and {} neutral.",
            total, company, counts.positive, counts.negative, counts.neutral
        ),
    }
}
