//! RecordStore integration tests.

mod persistence;
