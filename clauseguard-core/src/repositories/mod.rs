pub mod postgres;

pub use postgres::PostgresRecordRepository;
pub use clauseguard_common::traits::repository_traits::RecordRepository;
