// Adaptive text-fitting and layout engine.
// Implements: greedy wrapping with a char-level fallback, pre-draw height
// estimation, two-column balancing, the bounded shrink loop, and the renderer
// that assigns positions around the reserved scannable-code rectangle.
// Everything here is pure and synchronous; the binary runs it inside
// tokio::task::spawn_blocking.

pub mod builder;
pub mod columns;
pub mod fit;
pub mod geometry;
pub mod measure;
pub mod renderer;
pub mod wrap;

// Re-export the public API consumed by the binary and the raster backend.
pub use builder::build_poster_plan;
pub use geometry::{PosterGeometry, Rect};
pub use measure::{Face, HelveticaMeasurer, TextMeasurer};
pub use renderer::{LayoutPlan, PosterContent, TextRun};
