//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: UI/CLI invokes application use cases.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Show today's prayer times with a live countdown to the next one.
    async fn run_prayer_times(&self) -> Result<(), DomainError>;

    /// Arm the Qibla compass and stream the indicator rotation until stopped.
    async fn run_qibla(&self) -> Result<(), DomainError>;
}
