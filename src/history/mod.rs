/// History module
///
/// Finds and reads shell history transcripts.

pub mod ingestor;
pub mod shell_detector;

pub use ingestor::HistoryIngestor;
pub use shell_detector::{Shell, ShellDetector};
