//! Integration tests for the feed lifecycle: set properties, add items,
//! finalize, render.
//!
//! Each test builds its own `Feed`; nothing is shared between tests.

use pretty_assertions::assert_eq;
use rssgen::feed::{
    render_rss, Feed, FeedError, FeedState, Item, RenderOptions, CHANNEL_ELEMENTS,
};

fn ready_feed() -> Feed {
    let mut feed = Feed::new();
    feed.set_channel_property("title", "My Feed").unwrap();
    feed.set_channel_property("description", "Feed desc").unwrap();
    feed.set_channel_property("link", "http://example.com").unwrap();
    feed
}

fn is_rfc822_gmt(value: &str) -> bool {
    // "Tue, 14 Nov 2023 22:13:20 GMT"
    const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    let parts: Vec<&str> = value.split(' ').collect();
    if parts.len() != 6 {
        return false;
    }
    let digits = |s: &str, n: usize| s.len() == n && s.bytes().all(|b| b.is_ascii_digit());
    let time: Vec<&str> = parts[4].split(':').collect();

    parts[0].strip_suffix(',').is_some_and(|d| WEEKDAYS.contains(&d))
        && digits(parts[1], 2)
        && MONTHS.contains(&parts[2])
        && digits(parts[3], 4)
        && time.len() == 3
        && time.iter().all(|t| digits(t, 2))
        && parts[5] == "GMT"
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_minimal_feed_with_linked_item() {
    let mut feed = ready_feed();
    feed.add_item(Item::from([("title", "Post 1"), ("link", "http://example.com/1")]))
        .unwrap();

    let rendered = feed.finalize().unwrap();
    assert_eq!(rendered.items[0].get("guid"), Some("http://example.com/1"));
}

#[test]
fn test_description_only_item_gets_no_guid_or_link() {
    let mut feed = ready_feed();
    feed.add_item(Item::from([("description", "no title or link")]))
        .unwrap();

    let item = &feed.items()[0];
    assert!(!item.contains("guid"));
    assert!(!item.contains("link"));
    assert_eq!(item.len(), 1);
}

#[test]
fn test_unknown_item_key_rejected() {
    let mut feed = ready_feed();
    let err = feed
        .add_item(Item::from([("title", "x"), ("foo", "bar")]))
        .unwrap_err();
    assert_eq!(
        err,
        FeedError::UnknownElement {
            element: "foo".to_string()
        }
    );
    assert!(feed.items().is_empty());
}

#[test]
fn test_channel_pub_date_is_rfc822() {
    let mut feed = ready_feed();
    feed.set_channel_property("pubDate", 1_700_000_000_i64)
        .unwrap();
    let value = feed.channel_property("pubDate").unwrap().unwrap();
    assert!(is_rfc822_gmt(&value), "not RFC-822: {value}");
}

#[test]
fn test_title_only_feed_cannot_finalize() {
    let mut feed = Feed::new();
    feed.set_channel_property("title", "My Feed").unwrap();

    match feed.finalize() {
        Err(FeedError::MissingMandatoryProperty { missing }) => {
            assert_eq!(missing, vec!["description", "link"]);
        }
        other => panic!("expected MissingMandatoryProperty, got {other:?}"),
    }
    assert_eq!(feed.state(), FeedState::Failed);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_whitelisted_names_round_trip() {
    let mut feed = Feed::new();
    for name in CHANNEL_ELEMENTS {
        feed.set_channel_property(name, "2023-11-14").unwrap();
        let value = feed.channel_property(name).unwrap().unwrap();
        if name == "pubDate" || name == "lastBuildDate" {
            assert_eq!(value, "Tue, 14 Nov 2023 00:00:00 GMT");
        } else {
            assert_eq!(value, "2023-11-14");
        }
    }
}

#[test]
fn test_items_lacking_title_and_description_rejected() {
    let mut feed = ready_feed();
    for item in [
        Item::new(),
        Item::from([("link", "http://a")]),
        Item::from([("title", ""), ("guid", "g")]),
    ] {
        assert_eq!(feed.add_item(item), Err(FeedError::MissingField));
    }
    assert!(feed.items().is_empty());
}

#[test]
fn test_unparseable_pub_date_aborts_add_item() {
    let mut feed = ready_feed();
    feed.add_item(Item::from([("title", "kept")])).unwrap();

    let err = feed
        .add_item(Item::from([("title", "dropped"), ("pubDate", "next tuesday")]))
        .unwrap_err();
    assert_eq!(
        err,
        FeedError::InvalidDate {
            input: "next tuesday".to_string()
        }
    );

    assert_eq!(feed.items().len(), 1);
    assert_eq!(feed.items()[0].get("title"), Some("kept"));
    assert_eq!(feed.state(), FeedState::Building);
}

#[test]
fn test_duplicates_allowed_and_order_preserved() {
    let mut feed = ready_feed();
    feed.add_items([
        Item::from([("title", "a")]),
        Item::from([("title", "b")]),
        Item::from([("title", "a")]),
    ])
    .unwrap();
    let titles: Vec<_> = feed.items().iter().filter_map(|i| i.get("title")).collect();
    assert_eq!(titles, vec!["a", "b", "a"]);
}

#[test]
fn test_prepare_item_hook_fills_defaults_before_check() {
    let mut feed = ready_feed();
    feed.on_prepare_item(|item| {
        if !item.contains("author") {
            item.set("author", "editor@example.com");
        }
        Ok(())
    });
    feed.add_item(Item::from([("title", "t")])).unwrap();
    assert_eq!(feed.items()[0].get("author"), Some("editor@example.com"));
}

#[test]
fn test_custom_check_hook_can_reject() {
    let mut feed = ready_feed();
    feed.on_check_item(|item| match item.get("link") {
        Some(link) if !link.starts_with("https://") => {
            Err(FeedError::Hook(format!("insecure link {link}")))
        }
        _ => Ok(()),
    });

    assert!(feed
        .add_item(Item::from([("title", "t"), ("link", "https://a")]))
        .is_ok());
    assert_eq!(
        feed.add_item(Item::from([("title", "t"), ("guid", "http://b")])),
        Err(FeedError::Hook("insecure link http://b".to_string()))
    );
    assert_eq!(feed.items().len(), 1);
}

#[test]
fn test_finalize_then_render() {
    let mut feed = ready_feed();
    feed.set_channel_property("lastBuildDate", "2023-11-14T22:13:20Z")
        .unwrap();
    feed.add_item(Item::from([
        ("title", "Post 1"),
        ("link", "http://example.com/1"),
        ("pubDate", "2023-11-14 22:13:20"),
    ]))
    .unwrap();

    let rendered = feed.finalize().unwrap();
    let options = RenderOptions {
        indent: 0,
        ..RenderOptions::default()
    };
    let xml = render_rss(&rendered, &options).unwrap();
    assert!(xml.contains("<lastBuildDate>Tue, 14 Nov 2023 22:13:20 GMT</lastBuildDate>"));
    assert!(xml.contains(
        "<item><title>Post 1</title><link>http://example.com/1</link>\
         <guid>http://example.com/1</guid>\
         <pubDate>Tue, 14 Nov 2023 22:13:20 GMT</pubDate></item>"
    ));
}
