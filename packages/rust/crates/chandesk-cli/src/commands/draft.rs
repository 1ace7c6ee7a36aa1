use anyhow::{Context, Result};

use super::Desk;
use crate::cli::DraftCommand;

pub(crate) async fn run_draft_command(desk: &Desk, command: DraftCommand) -> Result<()> {
    match command {
        DraftCommand::Show => {
            let draft = desk.load()?.draft;
            if draft.is_empty() {
                println!("Draft is empty");
                return Ok(());
            }
            println!("title: {}", draft.title);
            println!("--- content ---");
            println!("{}", draft.content);
            println!("--- telegram preview ---");
            println!("{}", desk.normalizer().normalize(&draft.content));
        }
        DraftCommand::Set {
            title,
            content_file,
        } => {
            let content = match content_file {
                Some(path) => Some(
                    tokio::fs::read_to_string(&path)
                        .await
                        .with_context(|| format!("failed to read {}", path.display()))?,
                ),
                None => None,
            };
            let state = desk.update(|state| {
                if let Some(title) = &title {
                    state.draft.title.clone_from(title);
                }
                if let Some(content) = &content {
                    state.draft.content.clone_from(content);
                }
            })?;
            println!(
                "Draft saved ({} characters of content)",
                state.draft.content.chars().count()
            );
        }
        DraftCommand::Reset => {
            desk.update(|state| state.draft.clear())?;
            println!("Draft cleared");
        }
    }
    Ok(())
}
