//! Question corpus built from annotated spreadsheet rows.
//!
//! Each sheet of the source workbook collects sentences of one word-order
//! construction of the directional complement 上来. Every row yields up to
//! three questions (phrase, sentence, meaning), each with shuffled options
//! and a trailing "none of the above" sentinel.

pub mod builder;
pub mod construction;
pub mod row;

pub use builder::QuestionBuilder;
pub use construction::{Construction, SheetSpec};
pub use row::{Sheet, SheetRow};
