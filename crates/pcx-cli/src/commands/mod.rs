pub mod config;
pub mod costs;
pub mod dispatch;
pub mod evm;
pub mod report;
pub mod risk;
pub mod rollup;
pub mod schema;
pub mod scurve;
pub mod variance;
