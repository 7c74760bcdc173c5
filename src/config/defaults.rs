//! Default value functions for configuration.

pub fn default_service_name() -> String {
    "chanbind".to_string()
}

pub fn default_true() -> bool {
    true
}

pub fn default_log_filter() -> String {
    "info".to_string()
}
