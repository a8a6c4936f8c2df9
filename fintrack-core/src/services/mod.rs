//! Service layer - use-case orchestration
//!
//! Services coordinate the domain functions with an account store. Each
//! service covers one feature area of the CLI.

mod account;
mod doctor;
pub mod logging;
pub mod migration;
mod seed;
mod summary;

pub use account::AccountService;
pub use doctor::{CheckResult, DoctorResult, DoctorService, DoctorSummary};
pub use logging::{EntryPoint, LogEntry, LogEvent, LogStats, LoggingService};
pub use migration::{MigrationResult, MigrationService};
pub use seed::{SeedResult, SeedService};
pub use summary::{ConvertedTotal, CurrencyLine, Dashboard, SummaryService, TypeLine};
