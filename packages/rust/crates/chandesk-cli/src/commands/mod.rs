mod auth;
mod draft;
mod hashtags;
mod normalize;
mod posts;
mod users;

use anyhow::{Context, Result};
use chandesk_cli::{DeskSettings, config_home};
use chandesk_client::DeskClient;
use chandesk_compose::{DeskState, DeskStore, JsonFileStore};
use chandesk_html::TelegramHtmlNormalizer;
use tracing::debug;

pub(crate) use auth::{run_login, run_logout, run_whoami};
pub(crate) use draft::run_draft_command;
pub(crate) use hashtags::run_hashtags_command;
pub(crate) use normalize::run_normalize;
pub(crate) use posts::run_posts_command;
pub(crate) use users::run_users_command;

/// Settings plus the desk-state file every command works against.
pub(crate) struct Desk {
    pub(crate) settings: DeskSettings,
    store: JsonFileStore,
}

impl Desk {
    pub(crate) fn open(settings: DeskSettings) -> Self {
        let path = settings.state_path(&config_home());
        debug!(path = %path.display(), "desk state file");
        Self {
            settings,
            store: JsonFileStore::new(path),
        }
    }

    pub(crate) fn load(&self) -> Result<DeskState> {
        self.store.load().with_context(|| {
            format!(
                "failed to load desk state from {}",
                self.store.path().display()
            )
        })
    }

    pub(crate) fn update(&self, mut change: impl FnMut(&mut DeskState)) -> Result<DeskState> {
        self.store
            .update(&mut change)
            .context("failed to save desk state")
    }

    pub(crate) fn normalizer(&self) -> TelegramHtmlNormalizer {
        TelegramHtmlNormalizer::new(self.settings.normalize_options())
    }

    /// Client resuming the stored session.
    pub(crate) fn client(&self) -> Result<DeskClient> {
        let state = self.load()?;
        Ok(DeskClient::with_session(
            self.settings.api_config(),
            state.session,
        ))
    }

    /// Writes the client's current session (refreshed, cleared or new) back.
    pub(crate) async fn persist_session(&self, client: &DeskClient) -> Result<()> {
        let session = client.session().await;
        self.update(|state| state.session.clone_from(&session))?;
        Ok(())
    }
}

/// Runs an API-backed command and persists the session whatever the outcome,
/// so refreshed tokens and forced logouts survive failed commands.
pub(crate) async fn with_client<F, Fut>(desk: &Desk, run: F) -> Result<()>
where
    F: FnOnce(DeskClient) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let client = desk.client()?;
    let result = run(client.clone()).await;
    desk.persist_session(&client).await?;
    result
}
