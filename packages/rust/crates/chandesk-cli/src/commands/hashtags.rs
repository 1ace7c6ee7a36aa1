use anyhow::Result;
use chandesk_compose::Hashtag;

use super::Desk;
use crate::cli::HashtagsCommand;

pub(crate) fn run_hashtags_command(desk: &Desk, command: HashtagsCommand) -> Result<()> {
    match command {
        HashtagsCommand::List => {
            let state = desk.load()?;
            if state.hashtags.is_empty() {
                println!("No saved hashtags");
            }
            for tag in state.hashtags.iter() {
                println!("{tag}");
            }
        }
        HashtagsCommand::Add { tag } => {
            let tag = Hashtag::parse(&tag)?;
            let mut added = false;
            desk.update(|state| added = state.hashtags.add(tag.clone()))?;
            if added {
                println!("Saved {tag}");
            } else {
                println!("{tag} is already saved");
            }
        }
        HashtagsCommand::Remove { tag } => {
            let tag = Hashtag::parse(&tag)?;
            let mut removed = false;
            desk.update(|state| removed = state.hashtags.remove(&tag))?;
            if removed {
                println!("Removed {tag}");
            } else {
                println!("{tag} was not saved");
            }
        }
    }
    Ok(())
}
