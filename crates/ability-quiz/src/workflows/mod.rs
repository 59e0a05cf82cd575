pub mod assessment;
pub mod payments;
