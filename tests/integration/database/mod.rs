//! End-to-end flows against Postgres
