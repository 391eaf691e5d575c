//! Test-only crate: see `tests/` for end-to-end scenarios across
//! `ll-protocol`, `ll-log-tools` and `ll-api`.
