use crate::error::ActivityLoggerError;

/// Process exit code for a failed demo request, following curl's numbering.
pub fn exit_code_for_error(err: &ActivityLoggerError) -> i32 {
    match err {
        ActivityLoggerError::InvalidUrl(_) => 3,
        ActivityLoggerError::Config(_) => 2,
        ActivityLoggerError::Status(_) => 22,
        ActivityLoggerError::Io(_) => 23,
        ActivityLoggerError::Json(_) => 26,
        ActivityLoggerError::Http(err) => http_exit_code(err),
    }
}

fn http_exit_code(err: &reqwest::Error) -> i32 {
    if err.is_timeout() {
        return 28;
    }
    if err.is_connect() {
        return 7;
    }
    if err.is_builder() {
        return 3;
    }
    if err.is_body() || err.is_decode() {
        return 56;
    }
    43
}
