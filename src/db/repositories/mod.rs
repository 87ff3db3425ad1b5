pub mod admin;
pub mod consultation;
pub mod property;

/// Row timestamp: RFC 3339 UTC with microseconds, so string order is time order.
pub(crate) fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}
