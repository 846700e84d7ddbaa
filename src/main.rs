//! Interactive translate-query runner.
//!
//! Usage:
//!   tr-query tr en fr: good morning     # Translate one query
//!   tr-query                            # Read queries from stdin, one per line
//!
//! Optional environment variables:
//! - TRANSLATE_API_URL (defaults to the public Google endpoint)
//! - DEFAULT_SOURCE_LANGUAGE / DEFAULT_TARGET_LANGUAGE (default to ??, auto-detect)
//! - TRANSLATION_CACHE_CAPACITY (defaults to 256)
//! - TRANSLATION_CACHE_TTL_SECS (no expiry when unset)

use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tr_query::cache::TranslationCache;
use tr_query::config::Config;
use tr_query::highlight::{HighlightSpan, HighlightTag};
use tr_query::settings::Settings;
use tr_query::search::Translator;
use tr_query::translation::GoogleTranslateClient;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tr_query=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    info!(
        "Default languages: {} -> {}",
        config.default_source_language, config.default_target_language
    );

    let mut cache = TranslationCache::new(config.cache_capacity);
    if let Some(ttl) = config.cache_ttl {
        cache = cache.with_ttl(ttl);
    }

    let translator = Translator::new(
        Arc::new(Settings::from_config(&config)),
        Arc::new(GoogleTranslateClient::new(
            reqwest::Client::new(),
            config.translate_api_url.clone(),
        )),
        Arc::new(cache),
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        run_query(&translator, &args.join(" ")).await;
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        run_query(&translator, &line).await;
    }

    info!("Metrics: {:?}", translator.metrics());
    Ok(())
}

async fn run_query(translator: &Translator, input: &str) {
    let Some(intent) = translator.pattern_match(input) else {
        println!("no results");
        return;
    };

    println!("{}", render_highlights(input, &intent.highlight_spans));
    match translator.search(input).await {
        Some(result) => println!("{}", result.item.name),
        None => println!("no results"),
    }
}

/// Render `input` with each span as `[text]{tag}`.
fn render_highlights(input: &str, spans: &[HighlightSpan]) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + spans.len() * 16);
    let mut pos = 0;

    for span in spans {
        let start = span.start.min(chars.len());
        let end = span.end.min(chars.len());
        if start < pos {
            continue;
        }
        out.extend(&chars[pos..start]);
        out.push('[');
        out.extend(&chars[start..end]);
        out.push(']');
        let tags: Vec<&str> = span.tags.iter().map(|tag| tag_name(*tag)).collect();
        out.push_str(&format!("{{{}}}", tags.join(",")));
        pos = end;
    }
    out.extend(&chars[pos..]);

    out
}

fn tag_name(tag: HighlightTag) -> &'static str {
    match tag {
        HighlightTag::PatternMatch => "match",
        HighlightTag::Error => "error",
        HighlightTag::Operator => "operator",
        HighlightTag::Literal => "literal",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_highlights() {
        let spans = vec![
            HighlightSpan {
                start: 0,
                end: 2,
                tags: vec![HighlightTag::PatternMatch],
            },
            HighlightSpan {
                start: 3,
                end: 5,
                tags: vec![HighlightTag::Error],
            },
        ];

        assert_eq!(
            render_highlights("tr xx: hi", &spans),
            "[tr]{match} [xx]{error}: hi"
        );
    }

    #[test]
    fn test_render_without_spans() {
        assert_eq!(render_highlights("tr: hi", &[]), "tr: hi");
    }
}
