use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chandesk_client::DeskClient;
use chandesk_compose::{
    Hashtag, ImageRef, Page, Post, PostDraftBuilder, PostFilter, PostKind, ScheduledAt,
};
use chrono::Local;
use tracing::info;

use super::Desk;
use crate::cli::PostsCommand;

fn print_post_row(post: &Post) {
    let when = post
        .published_at()
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    let status = match post.is_published {
        Some(true) => "published",
        Some(false) => "scheduled",
        None => "",
    };
    println!(
        "{:>6}  {when:<16}  {status:<9}  {}",
        post.id,
        post.title.as_deref().unwrap_or("(untitled)")
    );
}

pub(crate) async fn run_posts_command(
    desk: &Desk,
    client: &DeskClient,
    command: PostsCommand,
) -> Result<()> {
    match command {
        PostsCommand::List { from, to, page } => {
            let posts = client.list_posts().await.context("failed to list posts")?;
            let filter = PostFilter { from, to };
            let matched: Vec<Post> = filter.apply(&posts).into_iter().cloned().collect();
            let page = Page::of(matched, page, desk.settings.posts_per_page());
            for post in &page.items {
                print_post_row(post);
            }
            println!(
                "page {}/{} ({} posts)",
                page.page,
                page.total_pages.max(1),
                page.total_items
            );
        }
        PostsCommand::Channel => {
            let posts = client
                .channel_posts()
                .await
                .context("failed to load channel posts")?;
            for post in &posts {
                print_post_row(post);
            }
        }
        PostsCommand::Publish { id } => {
            let answer = client
                .publish_post(id)
                .await
                .with_context(|| format!("failed to publish post {id}"))?;
            let message = answer
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("published");
            println!("Post {id}: {message}");
        }
        PostsCommand::Delete { id } => {
            client
                .delete_post(id)
                .await
                .with_context(|| format!("failed to delete post {id}"))?;
            println!("Deleted post {id}");
        }
        PostsCommand::Create {
            title,
            content_file,
            kind,
            image,
            schedule,
            mentions,
            hashtags,
            dry_run,
        } => {
            let options = CreateOptions {
                title,
                content_file,
                kind: kind.map_or_else(|| desk.settings.default_kind(), PostKind::from),
                image,
                schedule,
                mentions,
                hashtags,
                dry_run,
            };
            create_post(desk, client, options).await?;
        }
    }
    Ok(())
}

struct CreateOptions {
    title: Option<String>,
    content_file: Option<PathBuf>,
    kind: PostKind,
    image: Option<PathBuf>,
    schedule: Option<String>,
    mentions: Vec<String>,
    hashtags: Vec<String>,
    dry_run: bool,
}

async fn create_post(desk: &Desk, client: &DeskClient, options: CreateOptions) -> Result<()> {
    let draft = desk.load()?.draft;
    let from_draft = options.content_file.is_none();
    let content = match &options.content_file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => draft.content.clone(),
    };
    let title = options.title.unwrap_or_else(|| {
        if from_draft {
            draft.title.clone()
        } else {
            String::new()
        }
    });

    let schedule = options
        .schedule
        .as_deref()
        .map(ScheduledAt::parse)
        .transpose()?
        .map(|at| at.ensure_future(Local::now().naive_local()))
        .transpose()?;
    let hashtags = options
        .hashtags
        .iter()
        .map(String::as_str)
        .map(Hashtag::parse)
        .collect::<Result<Vec<_>, _>>()?;

    // Placeholder so the caption limit applies before anything is uploaded.
    let provisional_image = options.image.as_ref().map(|path| ImageRef {
        filename: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        file_path: path.display().to_string(),
        ..ImageRef::default()
    });
    let author = client.session().await.and_then(|session| session.telegram_id);
    let mut request = PostDraftBuilder::new(title, content)
        .kind(options.kind)
        .mentions(options.mentions)
        .hashtags(hashtags)
        .image(provisional_image.unwrap_or_default())
        .author(author)
        .schedule(schedule)
        .normalizer(desk.normalizer())
        .build()?;

    if options.dry_run {
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }
    if !client.is_authenticated().await {
        bail!("not logged in; run `chandesk login` first");
    }

    if let Some(path) = &options.image {
        request.image_path = client
            .upload_image_file(path, options.kind.border_color())
            .await
            .context("image upload failed")?;
    }
    let post = client
        .create_post(&request)
        .await
        .context("failed to create post")?;
    info!(post_id = post.id, kind = %options.kind, "post created");

    if from_draft {
        desk.update(|state| state.draft.clear())?;
    }
    match request.date_publish {
        Some(at) => println!("Created post {} scheduled for {at}", post.id),
        None => println!("Created post {}", post.id),
    }
    Ok(())
}
