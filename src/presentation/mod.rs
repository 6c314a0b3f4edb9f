pub mod clipboard;
pub mod export;
pub mod summary;
pub mod table;
pub mod types;

pub use clipboard::{Clipboard, MemoryClipboard, Osc52Clipboard, clipboard_text, copy_test_case};
pub use export::{CSV_HEADER, export_csv, export_filename, today, write_export};
pub use summary::{EMPTY_PLACEHOLDER, VIEW_DETAILS_LABEL, render_summary, summary_lines};
pub use table::{TABLE_HEADERS, TableLayout, render_table, truncate};
pub use types::{CopyFeedback, PresentationError, PresentationResult};
