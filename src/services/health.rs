//! HTTP probes for process supervisors.

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::database::connection::DatabaseManager;
use crate::database::models::{Credit, User};

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub version: String,
    pub checked_at: DateTime<Utc>,
    pub uptime_seconds: i64,
    pub storage: StorageProbe,
}

/// Row counts read while probing the database.
#[derive(Debug, Serialize, Deserialize)]
pub struct StorageProbe {
    pub users: i64,
    pub credits: i64,
    pub latency_ms: u64,
}

#[derive(Clone)]
struct ProbeState {
    db: Arc<DatabaseManager>,
    started_at: DateTime<Utc>,
}

pub struct HealthService {
    pub router: Router,
}

impl HealthService {
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        let state = ProbeState {
            db,
            started_at: Utc::now(),
        };

        let router = Router::new()
            .route("/health", get(report))
            .route("/health/ready", get(readiness))
            .route("/health/live", get(|| async { Json("alive") }))
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
            .with_state(state);

        Self { router }
    }
}

/// Counts users and credits. Fails when the schema is missing or the pool is unusable.
async fn probe_storage(db: &DatabaseManager) -> Result<StorageProbe, sqlx::Error> {
    let started = Instant::now();
    let users = User::count(&db.pool).await?;
    let credits = Credit::count(&db.pool).await?;
    Ok(StorageProbe {
        users,
        credits,
        latency_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    })
}

async fn report(State(state): State<ProbeState>) -> Result<Json<HealthReport>, StatusCode> {
    let storage = probe_storage(&state.db).await.map_err(|e| {
        tracing::warn!("Health probe failed: {}", e);
        StatusCode::SERVICE_UNAVAILABLE
    })?;

    let now = Utc::now();
    Ok(Json(HealthReport {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checked_at: now,
        uptime_seconds: (now - state.started_at).num_seconds(),
        storage,
    }))
}

async fn readiness(State(state): State<ProbeState>) -> Result<Json<&'static str>, StatusCode> {
    probe_storage(&state.db)
        .await
        .map(|_| Json("ready"))
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::NewCredit;
    use axum_test::TestServer;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    async fn migrated_server() -> (TestServer, Arc<DatabaseManager>, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let url = format!("sqlite:{}", dir.path().join("health.db").display());
        let db = Arc::new(DatabaseManager::new(&url).await.expect("database"));
        db.run_migrations().await.expect("migrations");

        let server = TestServer::new(HealthService::new(db.clone()).router).expect("server");
        (server, db, dir)
    }

    #[tokio::test]
    async fn test_report_includes_row_counts() {
        let (server, db, _dir) = migrated_server().await;
        User::create_if_absent(&db.pool, 7).await.expect("user");
        Credit::create(
            &db.pool,
            NewCredit {
                user_id: 7,
                bank_name: "BankA".to_string(),
                loan_amount: 100.0,
                due_date: NaiveDate::from_ymd_opt(2024, 12, 31).expect("date"),
            },
        )
        .await
        .expect("credit");

        let response = server.get("/health").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let report: HealthReport = response.json();
        assert_eq!(report.status, "healthy");
        assert_eq!(report.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(report.storage.users, 1);
        assert_eq!(report.storage.credits, 1);
        assert!(report.uptime_seconds >= 0);
    }

    #[tokio::test]
    async fn test_unmigrated_database_is_unavailable() {
        let dir = TempDir::new().expect("temp dir");
        let url = format!("sqlite:{}", dir.path().join("blank.db").display());
        let db = Arc::new(DatabaseManager::new(&url).await.expect("database"));
        let server = TestServer::new(HealthService::new(db).router).expect("server");

        assert_eq!(server.get("/health").await.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            server.get("/health/ready").await.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        // Liveness does not touch storage
        assert_eq!(server.get("/health/live").await.status_code(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_and_live() {
        let (server, _db, _dir) = migrated_server().await;

        let ready = server.get("/health/ready").await;
        assert_eq!(ready.status_code(), StatusCode::OK);
        assert_eq!(ready.json::<String>(), "ready");

        let live = server.get("/health/live").await;
        assert_eq!(live.status_code(), StatusCode::OK);
        assert_eq!(live.json::<String>(), "alive");
    }
}
