//! EdgeRevenue core: the keyed entity store, the repositories built on top
//! of it, the pure report aggregation engine, and the seedable mock data
//! source the demo pulls from.

pub mod mock;
pub mod reports;
pub mod repository;
pub mod store;

pub use mock::MockSource;
pub use repository::{
    IntegrationAccountRepository, RepositoryError, RevenueSeriesRepository, UserRepository,
};
pub use store::{EntityStore, MemoryStore, StoreError};
