pub mod records;

pub use records::PostgresRecordRepository;
