//! Integration tests running the full loading sequence.

mod end_to_end;
