use std::path::PathBuf;

use anyhow::{Context, Result};
use chandesk_cli::DeskSettings;
use chandesk_html::{TELEGRAM_MAX_MESSAGE_LENGTH, TelegramHtmlNormalizer, visible_len};
use tokio::io::AsyncReadExt;

pub(crate) async fn run_normalize(
    file: Option<PathBuf>,
    keep_duplicates: bool,
    settings: &DeskSettings,
) -> Result<()> {
    let raw = match file {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("failed to read HTML from stdin")?;
            raw
        }
    };

    let mut options = settings.normalize_options();
    if keep_duplicates {
        options.collapse_duplicate_lines = false;
    }
    let normalized = TelegramHtmlNormalizer::new(options).normalize(&raw);
    let len = visible_len(&normalized);
    if len > TELEGRAM_MAX_MESSAGE_LENGTH {
        tracing::warn!(
            len,
            limit = TELEGRAM_MAX_MESSAGE_LENGTH,
            "normalized text exceeds the Telegram message limit"
        );
    }
    println!("{normalized}");
    Ok(())
}
