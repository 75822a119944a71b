use ai_digest::poller::parse_entries;
use ai_digest::types::PipelineError;
use chrono::{DateTime, Utc};

const RSS_OUT_OF_ORDER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test Feed</title>
    <link>https://example.com</link>
    <description>Fixture</description>
    <item>
      <title>Oldest</title>
      <link>https://example.com/oldest</link>
      <pubDate>Mon, 01 Jan 2024 08:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Newest</title>
      <link>https://example.com/newest</link>
      <pubDate>Wed, 03 Jan 2024 08:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Middle</title>
      <link>https://example.com/middle</link>
      <pubDate>Tue, 02 Jan 2024 08:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

const RSS_MIXED_DATES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test Feed</title>
    <link>https://example.com</link>
    <description>Fixture</description>
    <item>
      <title>Undated</title>
      <link>https://example.com/undated</link>
    </item>
    <item>
      <title>Dated</title>
      <link>https://example.com/dated</link>
      <pubDate>Wed, 03 Jan 2024 08:00:00 GMT</pubDate>
    </item>
    <item>
      <title>No link at all</title>
    </item>
  </channel>
</rss>"#;

const ATOM_UPDATED_ONLY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom Fixture</title>
  <id>urn:fixture</id>
  <updated>2024-01-03T08:00:00Z</updated>
  <entry>
    <title>Updated only</title>
    <id>urn:fixture:1</id>
    <link href="https://example.com/updated-only"/>
    <updated>2024-01-02T09:30:00Z</updated>
  </entry>
</feed>"#;

#[test]
fn entries_are_sorted_newest_first() {
    let entries = parse_entries(RSS_OUT_OF_ORDER.as_bytes(), "Test Source").unwrap();

    let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
    assert!(entries.windows(2).all(|w| w[0].published_at >= w[1].published_at));
}

#[test]
fn source_name_is_attached_to_every_entry() {
    let entries = parse_entries(RSS_OUT_OF_ORDER.as_bytes(), "arXiv: AI").unwrap();

    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| e.source_name == "arXiv: AI"));
}

#[test]
fn undated_entries_get_the_epoch_sentinel_and_sort_last() {
    let entries = parse_entries(RSS_MIXED_DATES.as_bytes(), "Test Source").unwrap();

    // The linkless item is dropped entirely.
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title, "Dated");
    assert_eq!(entries[1].title, "Undated");
    assert_eq!(entries[1].published_at, DateTime::<Utc>::UNIX_EPOCH);
}

#[test]
fn atom_updated_is_used_when_published_is_absent() {
    let entries = parse_entries(ATOM_UPDATED_ONLY.as_bytes(), "Atom Source").unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].link, "https://example.com/updated-only");
    assert_eq!(
        entries[0].published_at,
        "2024-01-02T09:30:00Z".parse::<DateTime<Utc>>().unwrap()
    );
}

#[test]
fn unparseable_content_is_a_feed_parse_error() {
    let result = parse_entries(b"this is not a feed", "Broken Source");

    assert!(matches!(result, Err(PipelineError::FeedParse(_))));
}
