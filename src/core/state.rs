use std::sync::Arc;

use aws_sdk_sesv2::Client as SesClient;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::services::{HttpService, mailer};

/// Server state - shared handles to every service
///
/// Cloning is shallow: the database connection, HTTP router and SES client
/// are all reference-counted internally.
///
/// | Field | Type | Purpose |
/// |-------|------|---------|
/// | config | Config | immutable configuration |
/// | db | Surreal<Db> | embedded database |
/// | http | HttpService | router + listener lifecycle |
/// | jwt_service | Arc<JwtService> | session tokens |
/// | ses | SesClient | transactional email |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// HTTP service
    pub http: HttpService,
    /// JWT session service (shared ownership)
    pub jwt_service: Arc<JwtService>,
    /// SES client for notifications
    pub ses: SesClient,
}

impl ServerState {
    /// Create server state from already-initialized parts
    ///
    /// Usually [`ServerState::initialize`] is what you want.
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        http: HttpService,
        jwt_service: Arc<JwtService>,
        ses: SesClient,
    ) -> Self {
        Self {
            config,
            db,
            http,
            jwt_service,
            ses,
        }
    }

    /// Initialize the server state
    ///
    /// Order matters:
    /// 1. working directory layout
    /// 2. database (work_dir/database/greenhouse.db)
    /// 3. services (JWT, SES, HTTP)
    /// 4. late router initialization (needs the finished state)
    ///
    /// # Panics
    ///
    /// Panics when the working directory or database cannot be initialized;
    /// there is nothing sensible to serve without them.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("greenhouse.db");
        let db_path_str = db_path.to_string_lossy();

        let db_service = DbService::new(&db_path_str)
            .await
            .expect("Failed to initialize database");
        let db = db_service.db;

        let http = HttpService::new(config.clone());
        let jwt_service = Arc::new(JwtService::default());
        let ses = mailer::build_ses_client().await;

        let state = Self::new(config.clone(), db, http.clone(), jwt_service, ses);

        // Late initialization for HttpService (needs state)
        http.initialize(state.clone());

        state
    }

    /// Get a database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Get the JWT service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
