pub mod analysis;
pub mod io;
pub mod models;
pub mod parsing;

// Re-export key types for easier usage
pub use analysis::{Analysis, Summary};
pub use models::Document;
pub use parsing::mdx::MdxReport;
pub use parsing::{BlockKind, BlockToken, CodeForm, ListItem, TableData, parse};
