//! Greenhouse Server - plant marketplace backend
//!
//! # Architecture overview
//!
//! This crate is the single backend for the Greenhouse storefront. It owns:
//!
//! - **Database** (`db`): embedded SurrealDB storage for users, plants and
//!   orders
//! - **Auth** (`auth`): cookie-carried JWT sessions plus per-request role
//!   guards
//! - **HTTP API** (`api`): RESTful interface consumed by the storefront and
//!   the admin dashboard
//! - **Services** (`services`): HTTP stack, payment intents, transactional
//!   email
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/          # config, state, server lifecycle
//! ├── auth/          # JWT sessions, cookies, role guards
//! ├── services/      # HTTP stack, payments, mailer
//! ├── api/           # HTTP routes and handlers
//! ├── utils/         # errors, logging, money
//! └── db/            # schema, models, repositories
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export public types
pub use auth::{JwtService, SessionUser};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - supports tracing format specifiers
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load .env, then bring up logging; everything else reads the environment
/// after this returns
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    match std::env::var("LOG_DIR") {
        Ok(dir) => init_logger_with_file(None, Some(&dir)),
        Err(_) => init_logger(),
    }

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ______
  / ____/_______  ___  ____
 / / __/ ___/ _ \/ _ \/ __ \
/ /_/ / /  /  __/  __/ / / /
\____/_/   \___/\___/_/ /_/
    __  __
   / / / /___  __  __________
  / /_/ / __ \/ / / / ___/ _ \
 / __  / /_/ / /_/ (__  )  __/
/_/ /_/\____/\__,_/____/\___/
    "#
    );
}
