use crate::config::Config;
use crate::db::Store;
use crate::services::UploadSweeper;

pub async fn cmd_sweep_uploads(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_url).await?;
    let sweeper = UploadSweeper::new(store, &config.uploads);

    println!("Sweeping {} ...", config.uploads.dir);
    let stats = sweeper.run_once().await?;

    println!(
        "✓ Deleted {} files, freed {} bytes ({} errors)",
        stats.files_deleted, stats.bytes_freed, stats.errors
    );

    Ok(())
}
