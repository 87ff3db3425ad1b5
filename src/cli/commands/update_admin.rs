use std::io::Write;

use crate::config::Config;
use crate::db::Store;

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub async fn cmd_update_admin(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_url).await?;

    let Some(admin) = store.first_admin().await? else {
        println!("No admin account found.");
        println!("Create one with: sharjah seed-admin");
        return Ok(());
    };

    println!("Current admin email: {}", admin.email);
    println!();

    let email = prompt("New email")?;
    let password = prompt("New password")?;

    if email.is_empty() || password.is_empty() {
        println!("Both email and password are required. Nothing changed.");
        return Ok(());
    }

    if let Some(existing) = store.get_admin_by_email(&email).await?
        && existing.id != admin.id
    {
        println!("Email '{email}' belongs to another admin. Nothing changed.");
        return Ok(());
    }

    let updated = store
        .update_admin_credentials(admin.id, &email, &password, &config.auth)
        .await?;
    println!("✓ Admin credentials updated: {}", updated.email);

    Ok(())
}
