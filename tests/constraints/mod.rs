//! Tests for the constraint registry and its document format.

mod registry_tests;
