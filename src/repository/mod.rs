pub mod completion_repository_impl;
