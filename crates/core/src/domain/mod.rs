pub mod contract;
pub mod fund;
pub mod recommendation;
