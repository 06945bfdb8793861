pub mod dataset;
pub mod features;
pub mod forecast;
pub mod power;
pub mod site;
pub mod weather;
