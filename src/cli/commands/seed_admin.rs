use crate::config::Config;
use crate::db::Store;

pub async fn cmd_seed_admin(config: &Config, email: &str, password: &str) -> anyhow::Result<()> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        anyhow::bail!("Email and password are required");
    }

    let store = Store::new(&config.general.database_url).await?;

    if store.get_admin_by_email(email).await?.is_some() {
        anyhow::bail!("Admin '{email}' already exists");
    }

    let admin = store.create_admin(email, password, &config.auth).await?;
    println!("✓ Admin created: {} (ID: {})", admin.email, admin.id);

    Ok(())
}
