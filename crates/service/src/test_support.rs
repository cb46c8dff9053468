#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    // Run migrations exactly once, with a throwaway connection
    MIGRATED
        .get_or_try_init(|| async {
            let db = models::db::connect().await?;
            migration::Migrator::up(&db, None).await?;
            drop(db);
            Ok::<(), anyhow::Error>(())
        })
        .await?;

    // Return a fresh connection for the current test's runtime
    let db = models::db::connect().await?;
    Ok(db)
}
