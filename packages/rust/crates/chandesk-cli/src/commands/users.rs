use anyhow::{Context, Result};
use chandesk_client::DeskClient;
use chandesk_compose::{SortConfig, SortDirection, User, UserQuery};

use crate::cli::UsersCommand;

fn flags(user: &User) -> String {
    [
        (user.is_superuser, 'S'),
        (user.is_admin, 'A'),
        (user.is_verified, 'V'),
        (user.is_active, '+'),
    ]
    .into_iter()
    .map(|(set, flag)| if set { flag } else { '-' })
    .collect()
}

fn print_user_row(user: &User) {
    println!(
        "{:>6}  {}  {:<24} {}",
        user.id,
        flags(user),
        user.username()
            .map(|name| format!("@{name}"))
            .unwrap_or_default(),
        user.display_name()
    );
}

pub(crate) async fn run_users_command(client: &DeskClient, command: UsersCommand) -> Result<()> {
    match command {
        UsersCommand::List {
            search,
            verified_only,
            sort,
            asc,
        } => {
            let users = client
                .list_users(None)
                .await
                .context("failed to list users")?;
            let direction = if asc {
                SortDirection::Asc
            } else {
                SortDirection::Desc
            };
            let query = UserQuery {
                search: search.unwrap_or_default(),
                verified_only,
                sort: SortConfig::new(sort.into(), direction),
            };
            let shown = query.apply(&users);
            for user in &shown {
                print_user_row(user);
            }
            println!(
                "{} of {} users (S=superuser A=admin V=verified +=active)",
                shown.len(),
                users.len()
            );
        }
        UsersCommand::Show { id } => {
            let user = client
                .get_user(id)
                .await
                .with_context(|| format!("failed to load user {id}"))?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        UsersCommand::Delete { id } => {
            client
                .delete_user(id)
                .await
                .with_context(|| format!("failed to delete user {id}"))?;
            println!("Deleted user {id}");
        }
        UsersCommand::RemoveFromChannel { id } => {
            client
                .remove_from_channel(id)
                .await
                .with_context(|| format!("failed to remove user {id} from the channel"))?;
            println!("Removed user {id} from the channel");
        }
    }
    Ok(())
}
