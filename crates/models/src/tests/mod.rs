
/// Entity CRUD tests
pub mod crud_tests;
