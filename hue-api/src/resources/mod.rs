//! Typed proxies over bridge resources

pub mod group;
pub mod light;
pub mod rule;
pub mod scene;
pub mod sensor;

pub use group::Group;
pub use light::Light;
pub use rule::{Rule, RuleAction, RuleCondition, RuleFilter};
pub use scene::Scene;
pub use sensor::Sensor;
