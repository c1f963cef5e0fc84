//! Summaries printed by the binary.

use chrono::{TimeZone, Utc};
use picturebook::report::{credential_report, manifest_summary};
use picturebook::{
    CredentialStatus, Page, PipelineState, RunManifest, RunStats, StoryDocument, StoryLength,
};
use std::path::PathBuf;

fn manifest() -> anyhow::Result<RunManifest> {
    let story = StoryDocument::new(
        "Otto's Umbrella",
        "a small otter with a yellow umbrella",
        "a rainy harbour town",
        "sharing keeps everyone dry",
        vec![
            Page::new(1, "Otto opened his umbrella."),
            Page::new(2, "He shared it with a duck."),
        ],
    );
    let images = vec![Some(PathBuf::from("/out/page_1_ab12cd34.png")), None];
    let audio = vec![None, Some(PathBuf::from("/out/page_2_ab12cd34.mp3"))];
    Ok(RunManifest {
        story_id: "ab12cd34".parse()?,
        length: StoryLength::Short,
        story,
        images,
        audio,
        pdf_path: Some(PathBuf::from("/out/storybook_ab12cd34.pdf")),
        stats: RunStats {
            images_ok: 1,
            audio_ok: 1,
            total_pages: 2,
        },
        state: PipelineState::Complete,
        transitions: vec![PipelineState::Started, PipelineState::Complete],
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap(),
    })
}

#[test]
fn test_manifest_summary_lists_every_page() -> anyhow::Result<()> {
    let summary = manifest_summary(&manifest()?);

    assert!(summary.contains("Story:    Otto's Umbrella (ab12cd34)"));
    assert!(summary.contains("Length:   short (2 pages)"));
    assert!(summary.contains("State:    complete"));
    assert!(summary.contains("Created:  2026-03-01 09:30:00 UTC"));
    assert!(summary.contains("Images:   1/2  Audio: 1/2"));
    assert!(summary.contains("PDF:      /out/storybook_ab12cd34.pdf"));
    assert!(summary.contains("Moral:    sharing keeps everyone dry"));
    assert!(summary.contains("Page 1: Otto opened his umbrella.\n  image: /out/page_1_ab12cd34.png\n  audio: -"));
    assert!(summary.contains("Page 2: He shared it with a duck.\n  image: -\n  audio: /out/page_2_ab12cd34.mp3"));
    Ok(())
}

#[test]
fn test_manifest_summary_flags_unfinished_runs() -> anyhow::Result<()> {
    let mut manifest = manifest()?;
    manifest.state = PipelineState::AudioDone;

    let summary = manifest_summary(&manifest);
    assert!(summary.contains("State:    audio_done (run did not finish)"));
    Ok(())
}

#[test]
fn test_credential_report_without_text_key() {
    let status = CredentialStatus {
        openrouter: false,
        replicate: true,
        freepik: false,
        huggingface: false,
    };
    let report = credential_report(&status);

    assert!(report.contains("OPENROUTER_API_KEY         missing"));
    assert!(report.contains("REPLICATE_API_TOKEN        set"));
    assert!(report.contains("Story generation needs OPENROUTER_API_KEY"));
}

#[test]
fn test_credential_report_all_set() {
    let status = CredentialStatus {
        openrouter: true,
        replicate: true,
        freepik: true,
        huggingface: true,
    };
    let report = credential_report(&status);

    assert_eq!(report.lines().count(), 4);
    assert!(!report.contains("missing"));
}
