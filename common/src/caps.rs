use std::ops::RangeInclusive;

pub const MAX_LOG_GROUP_NAME_LEN: usize = 512;
pub const MAX_LOG_STREAM_NAME_LEN: usize = 512;

/// `DescribeLogStreams` never returns more than 50 streams per page.
pub const MAX_DESCRIBE_LOG_STREAMS_LIMIT: usize = 50;

pub const MAX_USER_POOL_ID_LEN: usize = 55;
pub const MAX_CLIENT_ID_LEN: usize = 128;
pub const MAX_CLIENT_NAME_LEN: usize = 128;

pub const MAX_URL_LEN: usize = 1024;
pub const MAX_IDENTITY_PROVIDER_NAME_LEN: usize = 32;

pub const ACCESS_TOKEN_VALIDITY: RangeInclusive<i64> = 1..=86_400;
pub const ID_TOKEN_VALIDITY: RangeInclusive<i64> = 1..=86_400;
pub const REFRESH_TOKEN_VALIDITY: RangeInclusive<i64> = 0..=315_360_000;
pub const AUTH_SESSION_VALIDITY: RangeInclusive<i64> = 3..=15;

pub const MAX_ALLOWED_OAUTH_FLOWS: usize = 3;
pub const MAX_ALLOWED_OAUTH_SCOPES: usize = 50;
pub const MAX_CALLBACK_URLS: usize = 100;
pub const MAX_LOGOUT_URLS: usize = 100;
