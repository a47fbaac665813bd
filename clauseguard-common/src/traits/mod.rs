pub mod api;
pub mod auth_traits;
pub mod repository_traits;

pub use api::ContractActionsApi;
pub use auth_traits::IdentityResolver;
pub use repository_traits::RecordRepository;
