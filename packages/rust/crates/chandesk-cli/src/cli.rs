use std::path::PathBuf;

use chandesk_compose::{PostKind, SortKey};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "chandesk")]
#[command(about = "Compose, schedule and manage Telegram channel posts.")]
pub(crate) struct Cli {
    /// Override config directory (settings and desk state live under it).
    #[arg(long, global = true)]
    pub(crate) conf: Option<PathBuf>,

    /// Debug logging (RUST_LOG still wins).
    #[arg(long, short, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum PostKindArg {
    Info,
    Rubric,
    Challenge,
    Update,
}

impl From<PostKindArg> for PostKind {
    fn from(kind: PostKindArg) -> Self {
        match kind {
            PostKindArg::Info => Self::Info,
            PostKindArg::Rubric => Self::Rubric,
            PostKindArg::Challenge => Self::Challenge,
            PostKindArg::Update => Self::Update,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum UserSortArg {
    Priority,
    Fio,
    TelegramUsername,
    IsVerified,
    IsAdmin,
    IsSuperuser,
    IsActive,
}

impl From<UserSortArg> for SortKey {
    fn from(key: UserSortArg) -> Self {
        match key {
            UserSortArg::Priority => Self::Priority,
            UserSortArg::Fio => Self::Fio,
            UserSortArg::TelegramUsername => Self::TelegramUsername,
            UserSortArg::IsVerified => Self::IsVerified,
            UserSortArg::IsAdmin => Self::IsAdmin,
            UserSortArg::IsSuperuser => Self::IsSuperuser,
            UserSortArg::IsActive => Self::IsActive,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Normalize editor HTML into Telegram HTML (stdin or --file).
    Normalize {
        /// Read HTML from this file instead of stdin.
        #[arg(long)]
        file: Option<PathBuf>,

        /// Keep adjacent duplicate lines.
        #[arg(long)]
        keep_duplicates: bool,
    },
    /// Log in and store the session.
    Login {
        #[arg(long)]
        username: String,

        #[arg(long, env = "CHANDESK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Log out and forget the session.
    Logout,
    /// Show the logged-in operator.
    Whoami,
    /// Channel members.
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
    /// Posts.
    Posts {
        #[command(subcommand)]
        command: PostsCommand,
    },
    /// The locally saved draft.
    Draft {
        #[command(subcommand)]
        command: DraftCommand,
    },
    /// Saved hashtags.
    Hashtags {
        #[command(subcommand)]
        command: HashtagsCommand,
    },
}

#[derive(Subcommand)]
pub(crate) enum UsersCommand {
    /// List users: superusers, then admins, then everyone else.
    List {
        /// Substring of full name or Telegram username.
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        verified_only: bool,

        #[arg(long, value_enum, default_value = "priority")]
        sort: UserSortArg,

        /// Ascending order (default descending).
        #[arg(long)]
        asc: bool,
    },
    Show {
        id: i64,
    },
    Delete {
        id: i64,
    },
    /// Remove the user from the Telegram channel.
    RemoveFromChannel {
        id: i64,
    },
}

#[derive(Subcommand)]
pub(crate) enum PostsCommand {
    /// List posts, optionally within a publish-date window.
    List {
        /// First day (YYYY-MM-DD), inclusive.
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day (YYYY-MM-DD), inclusive.
        #[arg(long)]
        to: Option<NaiveDate>,

        /// 1-based page number.
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Posts currently in the Telegram channel.
    Channel,
    /// Publish a post now.
    Publish {
        id: i64,
    },
    Delete {
        id: i64,
    },
    /// Create a post from --content-file or the saved draft.
    Create {
        #[arg(long)]
        title: Option<String>,

        /// Editor HTML file; the saved draft is used when omitted.
        #[arg(long)]
        content_file: Option<PathBuf>,

        #[arg(long, value_enum)]
        kind: Option<PostKindArg>,

        /// Image to upload with a border in the kind's color.
        #[arg(long)]
        image: Option<PathBuf>,

        /// Publish time, YYYY-MM-DDTHH:MM (local).
        #[arg(long)]
        schedule: Option<String>,

        /// Telegram username to mention (repeatable).
        #[arg(long = "mention")]
        mentions: Vec<String>,

        /// Hashtag to append (repeatable).
        #[arg(long = "hashtag")]
        hashtags: Vec<String>,

        /// Print the request instead of sending it.
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum DraftCommand {
    Show,
    Set {
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        content_file: Option<PathBuf>,
    },
    Reset,
}

#[derive(Subcommand)]
pub(crate) enum HashtagsCommand {
    List,
    Add { tag: String },
    Remove { tag: String },
}
