/*!
 * Resource stores and their maintenance.
 *
 * - `store`: resx parsing, deterministic serialization and atomic writes
 * - `merge`: case-insensitive key de-duplication, diffing and merging
 * - `generator`: translate-and-persist for one source file and culture
 */

pub mod generator;
pub mod merge;
pub mod store;

pub use generator::{ResourceGenerator, StoreOutcome};
pub use merge::{dedupe_keys_case_insensitive, merge_resources, missing_keys};
pub use store::ResourceStore;
