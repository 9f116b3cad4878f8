//! Unit tests for the report context.


mod flatten_tests;
