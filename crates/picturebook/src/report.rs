//! Plain-text summaries printed by the `picturebook` binary.

use picturebook_config::CredentialStatus;
use picturebook_core::RunManifest;
use std::fmt::Write;
use std::path::Path;

fn slot(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Human-readable summary of a finished run.
///
/// # Examples
///
/// ```
/// # use picturebook::report::manifest_summary;
/// # fn demo(manifest: &picturebook::RunManifest) {
/// println!("{}", manifest_summary(manifest));
/// # }
/// ```
pub fn manifest_summary(manifest: &RunManifest) -> String {
    let stats = &manifest.stats;
    let mut out = String::new();
    let _ = writeln!(out, "Story:    {} ({})", manifest.story.title(), manifest.story_id);
    let _ = writeln!(out, "Length:   {} ({} pages)", manifest.length, stats.total_pages);
    if manifest.state.is_terminal() {
        let _ = writeln!(out, "State:    {}", manifest.state);
    } else {
        let _ = writeln!(out, "State:    {} (run did not finish)", manifest.state);
    }
    let _ = writeln!(
        out,
        "Created:  {}",
        manifest.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(
        out,
        "Images:   {}/{}  Audio: {}/{}",
        stats.images_ok, stats.total_pages, stats.audio_ok, stats.total_pages
    );
    let _ = writeln!(out, "PDF:      {}", slot(manifest.pdf_path.as_deref()));
    if !manifest.story.moral().trim().is_empty() {
        let _ = writeln!(out, "Moral:    {}", manifest.story.moral());
    }

    let assets = manifest.page_assets();
    for (i, page) in manifest.story.pages().iter().enumerate() {
        let asset = assets.get(i);
        let image = asset.and_then(|a| a.image_path().as_deref());
        let audio = asset.and_then(|a| a.audio_path().as_deref());
        let _ = writeln!(out);
        let _ = writeln!(out, "Page {}: {}", page.page(), page.text());
        let _ = writeln!(out, "  image: {}", slot(image));
        let _ = writeln!(out, "  audio: {}", slot(audio));
    }
    out
}

/// One line per credential, then a note on what missing ones disable.
pub fn credential_report(status: &CredentialStatus) -> String {
    let mut out = String::new();
    for (name, present) in status.entries() {
        let _ = writeln!(
            out,
            "{:<26} {}",
            name,
            if present { "set" } else { "missing" }
        );
    }

    if !status.can_generate_text() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Story generation needs OPENROUTER_API_KEY. Set it in the environment or in .env."
        );
    } else if !status.missing().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Providers without keys are skipped; missing illustrations fall back to placeholders."
        );
    }
    out
}
