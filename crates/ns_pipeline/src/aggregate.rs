use std::fmt::Write;

use ns_core::{ProcessedArticle, Report, SentimentCounts};

/// Tally labels and render the report. Pure; identical input yields
/// byte-identical output.
pub fn aggregate(processed: &[ProcessedArticle]) -> (SentimentCounts, Report) {
    let mut counts = SentimentCounts::default();
    for article in processed {
        counts.increment(article.sentiment);
    }
    let report = render_report(&counts, processed);
    (counts, report)
}

pub fn render_report(counts: &SentimentCounts, processed: &[ProcessedArticle]) -> Report {
    let mut report = String::from("📊 **Sentiment Analysis Report:**\n\n");
    // Writing into a String cannot fail.
    let _ = write!(
        report,
        "- **Positive Articles:** {}\n- **Negative Articles:** {}\n- **Neutral Articles:** {}\n\n",
        counts.positive, counts.negative, counts.neutral
    );
    report.push_str("**📰 Comparative Sentiment Analysis Across Articles:**\n\n");

    for (i, article) in processed.iter().enumerate() {
        let _ = write!(
            report,
            "{}. **{}**\n   - Sentiment: {}\n   - 🔗 [Read More]({})\n\n",
            i + 1,
            article.title(),
            article.sentiment,
            article.link()
        );
    }

    Report::new(report)
}
