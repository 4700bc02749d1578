//! Rendered feeds must be readable by a real feed parser.

use rssgen::config::Config;
use rssgen::definition::FeedDefinition;
use rssgen::feed::{render_rss, Feed, Item, RenderOptions};

#[test]
fn test_rendered_feed_parses_as_rss() {
    let mut feed = Feed::new();
    feed.set_channel_property("title", "Tom & Jerry's <Feed>").unwrap();
    feed.set_channel_property("description", "Cartoons").unwrap();
    feed.set_channel_property("link", "http://example.com/").unwrap();
    feed.set_channel_property("language", "en").unwrap();
    feed.add_items([
        Item::from([
            ("title", "Episode 1"),
            ("link", "http://example.com/1"),
            ("pubDate", "2023-11-14T22:13:20Z"),
        ]),
        Item::from([("description", "Untitled bonus\x01 clip"), ("guid", "urn:bonus")]),
    ])
    .unwrap();

    let xml = render_rss(&feed.finalize().unwrap(), &RenderOptions::default()).unwrap();
    let parsed = feed_rs::parser::parse(xml.as_bytes()).unwrap();

    assert_eq!(parsed.feed_type, feed_rs::model::FeedType::RSS2);
    assert_eq!(
        parsed.title.map(|t| t.content).as_deref(),
        Some("Tom & Jerry's <Feed>")
    );
    assert_eq!(parsed.entries.len(), 2);

    let first = &parsed.entries[0];
    assert_eq!(first.id, "http://example.com/1");
    assert_eq!(
        first.published.map(|d| d.timestamp()),
        Some(1_700_000_000)
    );

    let second = &parsed.entries[1];
    assert_eq!(second.id, "urn:bonus");
    assert_eq!(
        second.summary.as_ref().map(|s| s.content.as_str()),
        Some("Untitled bonus clip")
    );
}

#[test]
fn test_definition_to_xml_with_config() {
    let config = Config::from_toml("indent = 0\n[item_elements]\nadd = [\"media\"]\n").unwrap();
    let definition = FeedDefinition::from_toml(
        r#"
[channel]
title = "T"
description = "D"
link = "http://example.com"

[[items]]
title = "With media"
media = "clip.mp4"
"#,
    )
    .unwrap();

    let mut feed = config.new_feed().unwrap();
    definition.apply(&mut feed).unwrap();
    let xml = render_rss(&feed.finalize().unwrap(), &config.render_options()).unwrap();

    assert!(!xml.contains('\n'));
    assert!(xml.ends_with("<item><title>With media</title><media>clip.mp4</media></item></channel></rss>"));
}
