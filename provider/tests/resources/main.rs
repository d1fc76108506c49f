mod common;
mod log_stream;
mod user_pool_client;
