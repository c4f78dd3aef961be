pub mod approval;
pub mod gap_analysis;
pub mod recommendation;
