/*!
 * Translation plumbing shared by view, C# and folder processing.
 *
 * - `translator`: The `Translator` capability and the source-text translator
 * - `cache`: Digest-keyed translation cache and the caching decorator
 * - `pool`: Bounded concurrent translation of a file's missing keys
 * - `mock`: Mock translators for tests
 */

// Re-export main types for easier usage
pub use self::cache::{CachedTranslator, TranslationCache};
pub use self::mock::{MockBehavior, MockTranslator};
pub use self::pool::{KeyTranslationPool, KeyTranslations};
pub use self::translator::{is_declined, SourceTextTranslator, Translator};

// Submodules
pub mod cache;
pub mod mock;
pub mod pool;
pub mod translator;
