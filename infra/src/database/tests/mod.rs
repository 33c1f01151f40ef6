mod connection_tests;
mod mapping_tests;
mod pg_types_tests;
