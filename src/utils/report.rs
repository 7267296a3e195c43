use crate::core::csv_export::format_price;
use crate::core::stats::{round2, ScrapeStatistics};
use std::fmt::Write;

const RULE_WIDTH: usize = 50;

pub fn banner() -> String {
    format!(
        "\n\
╔═══════════════════════════════════════════════════════╗\n\
║          🕷️  PRODUCT SCRAPER v{:<8}                  ║\n\
║          JSON product list → CSV export               ║\n\
╚═══════════════════════════════════════════════════════╝\n",
        env!("CARGO_PKG_VERSION")
    )
}

pub fn render_statistics(stats: &ScrapeStatistics) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    // 寫入 String 不會失敗
    let _ = writeln!(out, "\n{}", rule);
    let _ = writeln!(out, "📈 SCRAPING STATISTICS");
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "📦 Total Products: {}", stats.total);
    let _ = writeln!(
        out,
        "💰 Price Range: {} - {}",
        format_price(round2(stats.min_price)),
        format_price(round2(stats.max_price))
    );
    let _ = writeln!(
        out,
        "💵 Average Price: {}",
        format_price(round2(stats.average_price))
    );
    let _ = writeln!(out, "📂 Categories:");
    for (category, count) in &stats.categories {
        let _ = writeln!(out, "   • {}: {} items", category, count);
    }
    let _ = write!(out, "{}", rule);
    out
}
