pub mod forecast;
pub mod implementations;
pub mod regression;
pub mod traits;
