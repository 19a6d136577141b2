//! Cross-subsystem scenarios.

pub mod concurrent_calls;
pub mod network_flows;
pub mod search_flows;
pub mod subscription_flows;
pub mod version_dispatch;
