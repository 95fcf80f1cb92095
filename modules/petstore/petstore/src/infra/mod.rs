pub mod storage;

pub use storage::InMemoryPetsRepository;
