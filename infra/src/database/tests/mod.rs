mod connection_tests;
mod postgres_tests;
