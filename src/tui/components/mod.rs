//! Widgets used by the table viewer

pub mod pagination_bar;
pub mod prompt;
pub mod table;

pub use pagination_bar::{BarButton, BarTarget, PaginationBar};
pub use prompt::{NumberPrompt, PromptResult};
pub use table::{render_table, CHECKBOX_COLUMNS};
