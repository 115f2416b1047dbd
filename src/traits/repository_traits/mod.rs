pub mod completion_repository;
