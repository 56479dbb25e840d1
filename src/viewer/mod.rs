//! Table-view logic: page window, selection, the row accumulator and the
//! state that ties them together. Nothing in here touches the terminal.

pub mod accumulate;
pub mod selection;
pub mod state;
pub mod window;

pub use accumulate::{accumulate_rows, accumulate_rows_with_progress, Accumulation, AccumulationProgress};
pub use selection::Selection;
pub use state::{LoadOutcome, LoadStatus, PageRequest, ViewerState};
pub use window::{DEFAULT_WINDOW_SIZE, MAX_WINDOW_SIZE};
