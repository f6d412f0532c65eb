//! Fully-defaulted shapes handed to the rendering boundary. Each entity has
//! exactly one constructor that resolves every missing field.

mod dashboard;
mod deployment;

pub use dashboard::DashboardView;
pub use deployment::DeploymentView;
