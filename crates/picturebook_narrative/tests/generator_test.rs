//! StoryTextGenerator behavior against a mock text provider.

mod test_utils;

use picturebook_core::{StoryLength, StoryRequest};
use picturebook_error::{ProviderErrorKind, StoryErrorKind};
use picturebook_narrative::StoryTextGenerator;
use strum::IntoEnumIterator;
use test_utils::{MockTextProvider, story_json, text_config};

fn generator(mock: &MockTextProvider, max_retries: usize) -> StoryTextGenerator {
    StoryTextGenerator::new(Box::new(mock.clone()), &text_config(max_retries))
}

#[tokio::test]
async fn test_generates_valid_story() -> anyhow::Result<()> {
    let mock = MockTextProvider::new_success(story_json(3));
    let request = StoryRequest::new("a mouse who visits the moon", StoryLength::Short);

    let story = generator(&mock, 0).generate(&request).await?;

    assert_eq!(story.title(), "Milo Finds the Moon");
    assert_eq!(story.page_count(), 3);
    assert!(story.is_contiguous());
    assert_eq!(mock.call_count(), 1);

    let sent = &mock.requests()[0];
    assert_eq!(
        sent.user(),
        "Create a 3-page children's storybook about: a mouse who visits the moon"
    );
    assert!(sent.system().contains("exactly 3 pages"));
    assert_eq!(*sent.temperature(), Some(0.7));
    Ok(())
}

#[tokio::test]
async fn test_prose_wrapped_json_is_recovered() -> anyhow::Result<()> {
    let content = format!("Here is your story!\n```json\n{}\n```\nHave fun.", story_json(5));
    let mock = MockTextProvider::new_success(content);

    let story = generator(&mock, 0)
        .generate(&StoryRequest::new("friendship", StoryLength::Normal))
        .await?;
    assert_eq!(story.page_count(), 5);
    Ok(())
}

#[tokio::test]
async fn test_blank_prompt_never_calls_provider() -> anyhow::Result<()> {
    let mock = MockTextProvider::new_success(story_json(5));

    let err = generator(&mock, 2)
        .generate(&StoryRequest::new("   \n", StoryLength::Normal))
        .await
        .unwrap_err();

    assert!(matches!(err.kind, StoryErrorKind::EmptyPrompt));
    assert_eq!(mock.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_wrong_page_count_is_not_retried() -> anyhow::Result<()> {
    let mock = MockTextProvider::new_success(story_json(4));

    let err = generator(&mock, 3)
        .generate(&StoryRequest::new("a lost kite", StoryLength::Normal))
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind,
        StoryErrorKind::PageCount {
            expected: 5,
            actual: 4
        }
    ));
    assert_eq!(mock.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_transient_failures_are_retried() -> anyhow::Result<()> {
    let mock = MockTextProvider::new_sequence(vec![
        Err(ProviderErrorKind::Rejection {
            status: 503,
            message: "overloaded".into(),
        }),
        Err(ProviderErrorKind::Transport("connection reset".into())),
        Ok(story_json(8)),
    ]);

    let story = generator(&mock, 2)
        .generate(&StoryRequest::new("pirates", StoryLength::Long))
        .await?;

    assert_eq!(story.page_count(), 8);
    assert_eq!(mock.call_count(), 3);
    Ok(())
}

#[tokio::test]
async fn test_retry_budget_is_bounded() -> anyhow::Result<()> {
    let mock = MockTextProvider::new_error(ProviderErrorKind::Rejection {
        status: 429,
        message: "rate limited".into(),
    });

    let err = generator(&mock, 2)
        .generate(&StoryRequest::new("bees", StoryLength::Short))
        .await
        .unwrap_err();

    match err.kind {
        StoryErrorKind::Provider(provider) => assert_eq!(provider.kind.status_code(), Some(429)),
        other => panic!("expected provider error, got {other:?}"),
    }
    assert_eq!(mock.call_count(), 3);
    Ok(())
}

#[tokio::test]
async fn test_gateway_errors_use_a_shorter_retry_budget() -> anyhow::Result<()> {
    let mock = MockTextProvider::new_error(ProviderErrorKind::Rejection {
        status: 502,
        message: "bad gateway".into(),
    });

    let result = generator(&mock, 5)
        .generate(&StoryRequest::new("bees", StoryLength::Short))
        .await;

    assert!(result.is_err());
    assert_eq!(mock.call_count(), 3);
    Ok(())
}

#[tokio::test]
async fn test_permanent_failure_after_transient_stops_retrying() -> anyhow::Result<()> {
    let mock = MockTextProvider::new_sequence(vec![
        Err(ProviderErrorKind::Transport("timed out".into())),
        Err(ProviderErrorKind::Rejection {
            status: 401,
            message: "bad key".into(),
        }),
        Ok(story_json(3)),
    ]);

    let err = generator(&mock, 3)
        .generate(&StoryRequest::new("bees", StoryLength::Short))
        .await
        .unwrap_err();

    match err.kind {
        StoryErrorKind::Provider(provider) => assert_eq!(provider.kind.status_code(), Some(401)),
        other => panic!("expected provider error, got {other:?}"),
    }
    assert_eq!(mock.call_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_permanent_failures_fail_fast() -> anyhow::Result<()> {
    let mock = MockTextProvider::new_error(ProviderErrorKind::Rejection {
        status: 401,
        message: "bad key".into(),
    });

    let result = generator(&mock, 5)
        .generate(&StoryRequest::new("bees", StoryLength::Short))
        .await;

    assert!(result.is_err());
    assert_eq!(mock.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_missing_fields_reported_together() -> anyhow::Result<()> {
    let mock = MockTextProvider::new_success(r#"{"title": "Half a Story", "pages": []}"#);

    let err = generator(&mock, 0)
        .generate(&StoryRequest::new("owls", StoryLength::Short))
        .await
        .unwrap_err();

    assert_eq!(
        err.kind.missing_fields(),
        ["character_description", "setting", "moral"]
    );
    Ok(())
}

#[tokio::test]
async fn test_every_length_yields_contiguous_pages() -> anyhow::Result<()> {
    for length in StoryLength::iter() {
        let page_count = length.spec().page_count;
        let mock = MockTextProvider::new_success(story_json(page_count));

        let story = generator(&mock, 0)
            .generate(&StoryRequest::new("a snail's long journey", length))
            .await?;

        assert_eq!(story.pages().len(), page_count, "{length}");
        for (i, page) in story.pages().iter().enumerate() {
            assert_eq!(*page.page(), i + 1, "{length}");
        }
    }
    Ok(())
}
