//! Record model and transformation engine for arcade catalog databases.
//!
//! Everything in this crate is pure and in-memory: classification of
//! machines into categories, partitioning catalogs into output groups, and
//! idempotent merge/patch operations keyed by identity. Parsing and
//! serialization live in `arcade-sort-xml`; orchestration and file output
//! live in `arcade-sort-lib`.

pub mod classifier;
pub mod error;
pub mod merge;
pub mod model;
pub mod partition;
pub mod predicates;

pub use classifier::{Classifier, ClassifierConfig};
pub use error::OrientationParseError;
pub use merge::{
    GenreLookup, backfill_genres, collapse_duplicates, insert_all_absent, insert_if_absent,
    sort_by_key,
};
pub use model::{CatalogEntry, CategoryMembershipSet, MachineRecord, Orientation};
pub use partition::{
    Group, ManufacturerGenre, Partition, partition, partition_by_genre,
    partition_by_manufacturer, partition_by_manufacturer_genre,
};
pub use predicates::{
    UNKNOWN_KEY, effective_key, is_vertical, manufacturer_tokens, normalize_manufacturer_token,
    pick_priority_manufacturer, safe_key,
};
