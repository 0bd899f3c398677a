pub mod access_log;
pub mod guards;
pub mod router;
pub mod routes;
