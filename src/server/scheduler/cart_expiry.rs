use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{data::cart::CartRepository, error::AppError};

/// Starts the expired-cart sweep.
///
/// Runs every minute and deletes carts whose `expires_at` has passed —
/// abandoned guest carts, primarily. User carts carry no expiry and are
/// never touched.
///
/// # Arguments
/// - `db`: Database connection
pub async fn start_scheduler(db: DatabaseConnection) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_db = db.clone();

    // Every minute, on the minute.
    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let db = job_db.clone();

        Box::pin(async move {
            if let Err(e) = sweep_expired_carts(&db).await {
                tracing::error!("Error sweeping expired carts: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Cart expiry scheduler started");

    Ok(())
}

/// Deletes every cart whose expiry has passed.
async fn sweep_expired_carts(db: &DatabaseConnection) -> Result<(), AppError> {
    let removed = CartRepository::new(db).delete_expired(Utc::now()).await?;

    if removed > 0 {
        tracing::info!("Removed {} expired carts", removed);
    }

    Ok(())
}
