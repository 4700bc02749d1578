//! Build validated RSS 2.0 feeds and render them to XML.
//!
//! A [`feed::Feed`] collects channel properties and items. Every property
//! name is checked against a whitelist, every item passes through an ordered
//! hook pipeline that validates and normalizes it, and dates are rewritten to
//! RFC-822. Finalizing checks that `title`, `description` and `link` are
//! set and hands back a [`feed::RenderedFeed`] for [`feed::render_rss`] or
//! any other serializer.

pub mod config;
pub mod definition;
pub mod feed;
pub mod util;
