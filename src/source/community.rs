//! Community forum topics.
//!
//! The forum serves a JSON version of every topic. The first post's rendered
//! HTML (`cooked`) holds the blueprint inside a `<code class="lang-...">`
//! block.

use regex::Regex;
use scraper::{Html, Selector};
use serde::Deserialize;
use std::sync::LazyLock;

use crate::blueprint::{is_blueprint_config, Blueprint};
use crate::error::{ImportError, Result};
use crate::fetch::Fetch;
use crate::yaml::parse_yaml;

use super::ImportedBlueprint;

static TOPIC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://community\.home-assistant\.io/t/[a-z0-9-]+/(?P<topic>\d+)(?:/(?P<post>\d+))?$")
        .expect("Invalid topic regex pattern")
});

/// Namespace for posts whose author is not in the topic JSON.
const FALLBACK_NAMESPACE: &str = "community";

/// Topic JSON as served by the forum, limited to the fields we read.
#[derive(Debug, Clone, Deserialize)]
pub struct CommunityTopic {
    pub slug: String,
    pub title: String,
    pub post_stream: PostStream,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostStream {
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub username: String,
    pub cooked: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A `<code>` block found in rendered post HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Language marker from `class="lang-<syntax>"`.
    pub syntax: String,
    /// Text content with HTML entities decoded.
    pub content: String,
}

/// Rewrite a topic URL (optionally pointing at a post) to the topic JSON URL.
pub fn import_url(url: &str) -> Result<String> {
    let caps = TOPIC_PATTERN
        .captures(url)
        .ok_or_else(|| ImportError::UnsupportedUrl(url.to_string()))?;

    // Chop off the post part, ie /2
    let topic_url = match caps.name("post") {
        Some(post) => &url[..post.start() - 1],
        None => url,
    };

    Ok(format!("{topic_url}.json"))
}

/// Fetch a topic and extract the first blueprint in its first post.
pub fn fetch(fetcher: &dyn Fetch, url: &str) -> Result<ImportedBlueprint> {
    let json_url = import_url(url)?;
    tracing::debug!(url, json_url = %json_url, "importing from community topic");

    let body = fetcher.get_text(&json_url)?;
    let topic: CommunityTopic = serde_json::from_str(&body)
        .map_err(|e| ImportError::invalid_response(&json_url, e))?;

    extract_blueprint(&topic)
}

/// Find the blueprint in the topic's first post.
///
/// Only blocks marked `yaml` or left on automatic detection (`auto`) are
/// considered, and a YAML error in either of them is returned.
pub fn extract_blueprint(topic: &CommunityTopic) -> Result<ImportedBlueprint> {
    let post = topic
        .post_stream
        .posts
        .first()
        .ok_or_else(|| ImportError::NoBlueprintFound("topic. The topic has no posts.".into()))?;

    for block in code_blocks(&post.cooked) {
        if block.syntax != "auto" && block.syntax != "yaml" {
            tracing::debug!(syntax = %block.syntax, "skipping code block");
            continue;
        }

        let content = block.content.trim();
        let data = parse_yaml(content)?;
        if !is_blueprint_config(&data) {
            continue;
        }

        let blueprint = Blueprint::new(data, None)?;
        let namespace = match post.username.as_str() {
            "" => FALLBACK_NAMESPACE,
            username => username,
        };
        return Ok(ImportedBlueprint {
            suggested_filename: format!("{namespace}/{}", topic.slug),
            raw_data: content.to_string(),
            blueprint,
        });
    }

    Err(ImportError::NoBlueprintFound(
        "topic. Blueprint syntax blocks need to be marked as YAML or no syntax.".into(),
    ))
}

/// All `<code class="lang-...">` blocks in document order.
pub fn code_blocks(html: &str) -> Vec<CodeBlock> {
    let fragment = Html::parse_fragment(html);
    let Ok(selector) = Selector::parse("code") else {
        return Vec::new();
    };

    fragment
        .select(&selector)
        .filter_map(|element| {
            let syntax = element
                .value()
                .classes()
                .find_map(|class| class.strip_prefix("lang-"))?
                .to_string();
            Some(CodeBlock {
                syntax,
                content: element.text().collect(),
            })
        })
        .collect()
}
