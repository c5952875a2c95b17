pub mod config;
pub mod telemetry;
pub mod state;
pub mod error;
pub mod domain { pub mod article; pub mod novelty; pub mod record; pub mod stamp; }
pub mod services { pub mod behavior; pub mod catalog; pub mod visit; }
pub mod web { pub mod router; pub mod handlers; pub mod utils; }

pub use crate::config::{Config, NoveltySettings, VisitCookieValue};
pub use crate::domain::novelty::{classify, Novelty, NoveltyValues};
pub use crate::domain::record::{Attributes, Timestamped};
pub use crate::domain::stamp::{Stamp, TimestampFormat};
pub use crate::services::{behavior::NoveltyBehavior, visit::VisitTracker};

use crate::services::catalog::Catalog;
use crate::state::AppState;

pub fn build_app(cfg: Config) -> (axum::Router, u16) {
    let boot = time::OffsetDateTime::now_utc();
    let catalog = Catalog::seeded(&cfg.novelty.timestamp_format, boot);
    tracing::info!(
        visit_cookie = %cfg.novelty.visit_cookie,
        cache_cookie = %cfg.novelty.cache_cookie,
        format = cfg.novelty.timestamp_format.describe(),
        "novelty tracking configured"
    );

    let state = AppState::new(cfg.novelty, catalog);
    (crate::web::router::build_router(state), cfg.port)
}
