mod layer_naming;
mod rollback_policy;

pub use layer_naming::AncestryLayerNaming;
pub use rollback_policy::RollbackPolicy;
