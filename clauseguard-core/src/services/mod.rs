pub mod contract_actions;

pub use contract_actions::{BoundActions, ContractActions};
