//! Weighted character counting for text input.
//!
//! ASCII code units count 0.5 and every other UTF-16 code unit counts 1.0,
//! so a limit lets users type about twice as many Latin letters as CJK
//! characters. [`count`] measures and trims text, [`filter`] decides how
//! much of an edit a limited field admits, and [`field`] puts the two
//! together behind a small editing API.

pub mod config;
pub mod count;
pub mod field;
pub mod filter;
pub mod terminal;

pub use config::{load_config, Settings};
pub use count::{char_count, char_count_ceil, trim_by_char_count, Counter};
pub use field::{Applied, FieldError, TextField};
pub use filter::{CharCountFilter, DebugFilter, Edit, FilterOutcome, InputFilter, LengthFilter};
pub use terminal::Terminal;
