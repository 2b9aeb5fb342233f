mod use_session_expiry;

pub(crate) use use_session_expiry::use_session_expiry;
