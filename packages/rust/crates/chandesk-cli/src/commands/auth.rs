use anyhow::{Context, Result, bail};
use chandesk_client::DeskClient;

pub(crate) async fn run_login(
    client: &DeskClient,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let Some(password) = password.filter(|password| !password.is_empty()) else {
        bail!("password required: pass --password or set CHANDESK_PASSWORD");
    };
    let session = client
        .login(username, &password)
        .await
        .context("login failed")?;
    let role = session.role.as_deref().unwrap_or("user");
    println!("Logged in as {} ({role})", username.trim());
    Ok(())
}

pub(crate) async fn run_logout(client: &DeskClient) -> Result<()> {
    if client.session().await.is_none() {
        println!("Not logged in");
        return Ok(());
    }
    client.logout().await;
    println!("Logged out");
    Ok(())
}

pub(crate) async fn run_whoami(client: &DeskClient) -> Result<()> {
    if !client.is_authenticated().await {
        println!("Not logged in");
        return Ok(());
    }
    let profile = client.profile().await.context("failed to load profile")?;
    let username = profile.username().map(|name| format!("@{name}"));
    println!(
        "{} {}",
        profile.display_name(),
        username.as_deref().unwrap_or("(no username)")
    );
    let superuser = client
        .session()
        .await
        .is_some_and(|session| session.is_superuser());
    if superuser || profile.is_superuser {
        println!("role: superuser");
    } else if profile.is_admin {
        println!("role: admin");
    }
    Ok(())
}
