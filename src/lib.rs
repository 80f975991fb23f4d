//! Item-response fit checks for a single test item.
//!
//! Given examinee abilities and their right/wrong answers on one item, the
//! crate compares observed behaviour with the Birnbaum model in two ways: a
//! per-ability confidence band ([`analysis::graphical`]) and a log-likelihood
//! comparison of three hypotheses ([`analysis::hypothesis`]).
//!
//! ```no_run
//! use item_analysis::analysis::{ItemAnalyzer, ItemParameters};
//! use item_analysis::data::loader::load_file;
//!
//! # fn main() -> anyhow::Result<()> {
//! let samples = load_file(std::path::Path::new("Data/data.csv"))?;
//! let report = ItemAnalyzer::new(ItemParameters::default(), samples)?.analyze();
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod data;
pub mod error;
pub mod serde_float;

pub use analysis::report::AnalysisReport;
pub use analysis::{ItemAnalyzer, ItemParameters};
pub use error::AnalysisError;
