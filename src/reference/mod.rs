pub mod catalog;
pub mod remote;
pub mod store;
pub mod sync;

pub use catalog::{
    AbilityRecord, HeroRecord, ItemRecord, ReferenceCatalog, ReferenceMetadata, ReferenceTable,
    SharedCatalog,
};
pub use remote::RemoteSource;
pub use store::LocalStore;
pub use sync::{SyncOutcome, Synchronizer};
