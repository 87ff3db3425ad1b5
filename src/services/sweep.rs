use anyhow::Result;
use std::path::PathBuf;
use tokio::fs;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, error, info, warn};

use crate::config::UploadConfig;
use crate::db::Store;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepStats {
    pub files_deleted: usize,
    pub bytes_freed: u64,
    pub errors: usize,
}

/// Removes upload files no property references once they pass the grace period.
#[derive(Clone)]
pub struct UploadSweeper {
    store: Store,
    dir: PathBuf,
    grace_hours: u32,
}

impl UploadSweeper {
    #[must_use]
    pub fn new(store: Store, config: &UploadConfig) -> Self {
        Self {
            store,
            dir: PathBuf::from(&config.dir),
            grace_hours: config.sweep_grace_hours,
        }
    }

    pub async fn run_once(&self) -> Result<SweepStats> {
        let mut stats = SweepStats::default();

        if !self.dir.exists() {
            return Ok(stats);
        }

        let referenced = self.store.referenced_upload_filenames().await?;
        let cutoff = chrono::Utc::now() - chrono::Duration::hours(i64::from(self.grace_hours));
        let mut entries = fs::read_dir(&self.dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if referenced.contains(name) {
                continue;
            }

            if let Ok(metadata) = fs::metadata(&path).await
                && let Ok(modified) = metadata.modified()
            {
                let modified_time: chrono::DateTime<chrono::Utc> = modified.into();

                if modified_time < cutoff {
                    let size = metadata.len();

                    match fs::remove_file(&path).await {
                        Ok(()) => {
                            debug!("Swept orphaned upload: {:?}", path);
                            stats.files_deleted += 1;
                            stats.bytes_freed += size;
                        }
                        Err(e) => {
                            warn!("Failed to delete {:?}: {}", path, e);
                            stats.errors += 1;
                        }
                    }
                }
            }
        }

        if stats.files_deleted > 0 {
            info!(
                "Upload sweep: deleted {} files, freed {} bytes",
                stats.files_deleted, stats.bytes_freed
            );
        }

        Ok(stats)
    }

    /// Registers the periodic sweep. The returned scheduler must be kept alive.
    pub async fn schedule(self, interval_hours: u32) -> Result<JobScheduler> {
        let hours = interval_hours.max(1);
        let cron = if hours >= 24 {
            "0 30 3 * * *".to_string()
        } else {
            format!("0 30 */{hours} * * *")
        };

        let sched = JobScheduler::new().await?;
        let job = Job::new_async(cron.as_str(), move |_uuid, _lock| {
            let sweeper = self.clone();
            Box::pin(async move {
                let start = std::time::Instant::now();
                info!(event = "job_started", job_name = "sweep_uploads", "Starting upload sweep");

                match sweeper.run_once().await {
                    Ok(stats) => info!(
                        event = "job_finished",
                        job_name = "sweep_uploads",
                        files_deleted = stats.files_deleted,
                        bytes_freed = stats.bytes_freed,
                        errors = stats.errors,
                        duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
                        "Upload sweep finished"
                    ),
                    Err(e) => {
                        error!(event = "job_failed", job_name = "sweep_uploads", error = %e, "Upload sweep failed");
                    }
                }
            })
        })?;

        sched.add(job).await?;
        sched.start().await?;

        info!("Upload sweep scheduled: {}", cron);
        Ok(sched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::property::{
        ContactInfo, MarlaSize, NewProperty, PriceType, PropertyImage, PropertyStatus,
        PropertyType, Society,
    };

    #[tokio::test]
    async fn test_sweep_keeps_referenced_and_recent_files() {
        let root = std::env::temp_dir().join(format!("sharjah-sweep-{}", uuid::Uuid::new_v4()));
        let uploads = root.join("uploads");
        std::fs::create_dir_all(&uploads).unwrap();

        let db_url = format!("sqlite:{}?mode=rwc", root.join("test.db").display());
        let store = Store::new(&db_url).await.unwrap();

        std::fs::write(uploads.join("images-1-1.jpg"), b"kept").unwrap();
        std::fs::write(uploads.join("images-2-2.jpg"), b"orphan").unwrap();

        store
            .add_property(&NewProperty {
                title: "Plot".to_string(),
                description: "Open plot".to_string(),
                location: "Block C".to_string(),
                marla_size: MarlaSize::ONE_CANAL,
                property_type: PropertyType::Plot,
                society: Society::Other,
                price: 1,
                price_type: PriceType::ForSale,
                features: Vec::new(),
                status: PropertyStatus::Available,
                contact_info: ContactInfo::default(),
                images: vec![PropertyImage {
                    filename: "images-1-1.jpg".to_string(),
                    original_name: "a.jpg".to_string(),
                    path: "/uploads/images-1-1.jpg".to_string(),
                    uploaded_at: "2026-01-01T00:00:00.000000Z".to_string(),
                }],
            })
            .await
            .unwrap();

        let config = UploadConfig {
            dir: uploads.to_string_lossy().into_owned(),
            sweep_grace_hours: 24,
            ..UploadConfig::default()
        };
        let stats = UploadSweeper::new(store.clone(), &config).run_once().await.unwrap();
        assert_eq!(stats.files_deleted, 0, "fresh orphans are within the grace period");

        let config = UploadConfig {
            sweep_grace_hours: 0,
            ..config
        };
        // Let the orphan's mtime fall strictly before the zero-hour cutoff.
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        let stats = UploadSweeper::new(store, &config).run_once().await.unwrap();

        assert_eq!(stats.files_deleted, 1);
        assert_eq!(stats.bytes_freed, 6);
        assert!(uploads.join("images-1-1.jpg").exists());
        assert!(!uploads.join("images-2-2.jpg").exists());

        let _ = std::fs::remove_dir_all(&root);
    }
}
