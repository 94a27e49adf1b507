//! Diagnosis interpretation for leaf classification results.
//!
//! Maps a (label -> probability) distribution to a single condition and a
//! treatment recommendation.
//!
//! # Architecture
//!
//! - **Table**: condition -> tier -> text, loaded from TOML (embedded default)
//! - **Selection**: strictly greatest probability wins, first entry on ties
//! - **Tiers**: early (<= 30), moderate (<= 60), severe (> 60)
//! - **Fallback**: unknown labels get generic advice, not an error
//!
//! # Example
//!
//! ```ignore
//! use leafdx_tauri::diagnosis::interpret;
//! use leafdx_tauri::prediction::Distribution;
//!
//! let dist: Distribution = [("Powdery mildew", 25.0), ("Healthy", 10.0)]
//!     .into_iter()
//!     .collect();
//!
//! let diagnosis = interpret(&dist)?;
//! println!("{} at {}%:\n{}", diagnosis.condition_label,
//!     diagnosis.severity_percentage, diagnosis.treatment_text);
//! ```

mod interpreter;
mod table;
mod types;

pub use interpreter::{interpret, select_winner};
pub use table::{default_table, load_table, parse_table};
pub use types::*;
