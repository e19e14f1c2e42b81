//! Integration tests for importing blueprints from each supported source

use blueprint_import::blueprint::InputDefinition;
use blueprint_import::fetch::MockFetcher;
use blueprint_import::source::community::{self, CommunityTopic};
use blueprint_import::{fetch_blueprint_from_url, ImportError};
use std::collections::BTreeMap;

const COMMUNITY_POST: &str = include_str!("fixtures/community_post.json");
const GITHUB_GIST: &str = include_str!("fixtures/github_gist.json");
const EVENT_SERVICE: &str = include_str!("fixtures/test_event_service.yaml");

const RAW_URL: &str = "https://raw.githubusercontent.com/balloob/home-assistant-config/main/blueprints/automation/motion_light.yaml";

fn event_service_inputs() -> BTreeMap<String, Option<InputDefinition>> {
    [
        ("service_to_call".to_string(), None),
        ("trigger_event".to_string(), None),
    ]
    .into_iter()
    .collect()
}

fn entity_selector(yaml: &str) -> Option<serde_yaml::Value> {
    Some(serde_yaml::from_str(yaml).unwrap())
}

#[test]
fn test_extract_blueprint_from_community_topic() {
    let topic: CommunityTopic = serde_json::from_str(COMMUNITY_POST).unwrap();
    let imported = community::extract_blueprint(&topic).unwrap();

    assert_eq!(imported.blueprint.domain(), "automation");
    assert_eq!(imported.blueprint.inputs(), &event_service_inputs());
    // Entities are decoded in the raw data
    assert!(imported
        .raw_data
        .contains("name: \"Call service based on event\""));
}

#[test]
fn test_fetch_blueprint_from_community_url() {
    let fetcher = MockFetcher::new().with_body(
        "https://community.home-assistant.io/t/test-topic/123.json",
        COMMUNITY_POST,
    );
    let url = "https://community.home-assistant.io/t/test-topic/123/2";

    let imported = fetch_blueprint_from_url(&fetcher, url).unwrap();

    assert_eq!(imported.blueprint.domain(), "automation");
    assert_eq!(imported.blueprint.inputs(), &event_service_inputs());
    assert_eq!(imported.suggested_filename, "balloob/test-topic");
    assert_eq!(imported.blueprint.source_url(), Some(url));
    assert_eq!(
        fetcher.requests(),
        vec!["https://community.home-assistant.io/t/test-topic/123.json".to_string()]
    );
}

#[test]
fn test_fetch_blueprint_from_github_url() {
    for url in [
        RAW_URL,
        "https://github.com/balloob/home-assistant-config/blob/main/blueprints/automation/motion_light.yaml",
    ] {
        let fetcher = MockFetcher::new().with_body(RAW_URL, EVENT_SERVICE);

        let imported = fetch_blueprint_from_url(&fetcher, url).unwrap();

        assert_eq!(imported.blueprint.domain(), "automation");
        assert_eq!(imported.blueprint.inputs(), &event_service_inputs());
        assert_eq!(imported.suggested_filename, "balloob/motion_light");
        assert_eq!(imported.blueprint.source_url(), Some(url));
        assert_eq!(imported.raw_data, EVENT_SERVICE);
    }
}

#[test]
fn test_fetch_blueprint_from_github_gist_url() {
    let fetcher = MockFetcher::new().with_body(
        "https://api.github.com/gists/e717ce85dd0d2f1bdcdfc884ea25a344",
        GITHUB_GIST,
    );
    let url = "https://gist.github.com/balloob/e717ce85dd0d2f1bdcdfc884ea25a344";

    let imported = fetch_blueprint_from_url(&fetcher, url).unwrap();

    assert_eq!(imported.blueprint.domain(), "automation");
    let expected: BTreeMap<String, Option<InputDefinition>> = [
        (
            "motion_entity".to_string(),
            Some(InputDefinition {
                name: Some("Motion Sensor".to_string()),
                selector: entity_selector(
                    "entity:\n  domain: binary_sensor\n  device_class: motion\n",
                ),
                ..Default::default()
            }),
        ),
        (
            "light_entity".to_string(),
            Some(InputDefinition {
                name: Some("Light".to_string()),
                selector: entity_selector("entity:\n  domain: light\n"),
                ..Default::default()
            }),
        ),
    ]
    .into_iter()
    .collect();
    assert_eq!(imported.blueprint.inputs(), &expected);
    assert_eq!(imported.suggested_filename, "balloob/motion_light");
    assert_eq!(imported.blueprint.source_url(), Some(url));
}

#[test]
fn test_fetch_blueprint_http_error() {
    let fetcher = MockFetcher::new().with_status(
        "https://api.github.com/gists/e717ce85dd0d2f1bdcdfc884ea25a344",
        404,
    );
    let err = fetch_blueprint_from_url(
        &fetcher,
        "https://gist.github.com/balloob/e717ce85dd0d2f1bdcdfc884ea25a344",
    )
    .unwrap_err();
    assert!(matches!(err, ImportError::Http { status: 404, .. }));
}

#[test]
fn test_fetch_blueprint_unsupported_url() {
    let fetcher = MockFetcher::new();
    let err =
        fetch_blueprint_from_url(&fetcher, "https://example.com/blueprints/light.yaml").unwrap_err();
    assert!(err.is_unsupported_url());
    assert!(fetcher.requests().is_empty());
}
