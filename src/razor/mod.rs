/*!
 * Razor view processing.
 *
 * - `line`: classifies each line as script or markup
 * - `segment`: groups classified lines into maximal same-kind runs
 * - `markup`: the HTML fragment capability the localizer edits through
 * - `localizer`: rewrites markup prose into `@Localizer["..."]` lookups
 */

pub mod line;
pub mod localizer;
pub mod markup;
pub mod segment;

pub use line::{classify_lines, Line, LineKind};
pub use localizer::{wrap_key, ViewLocalizer};
pub use markup::{HtmlFragment, MarkupFragment, TextEdit};
pub use segment::{classify_and_segment, segment_lines, Segment};
