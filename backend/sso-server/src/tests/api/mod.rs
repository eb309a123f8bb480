mod error;
mod extractors;
mod request_session;
