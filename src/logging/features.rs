//! Feature-specific logging targets and macros
//!
//! Every component logs under its own target so levels can be tuned per
//! feature in `LogConfig::features`.

/// Feature categories for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFeature {
    Schema,
    Webhook,
    HttpServer,
    Database,
    Assets,
}

impl LogFeature {
    pub const ALL: [LogFeature; 5] = [
        LogFeature::Schema,
        LogFeature::Webhook,
        LogFeature::HttpServer,
        LogFeature::Database,
        LogFeature::Assets,
    ];

    /// Get the target string for this feature
    pub fn target(&self) -> &'static str {
        match self {
            LogFeature::Schema => "slicecms::schema",
            LogFeature::Webhook => "slicecms::webhook",
            LogFeature::HttpServer => "slicecms::http_server",
            LogFeature::Database => "slicecms::database",
            LogFeature::Assets => "slicecms::assets",
        }
    }

    /// Key used for this feature in the `[features]` table
    pub fn name(&self) -> &'static str {
        match self {
            LogFeature::Schema => "schema",
            LogFeature::Webhook => "webhook",
            LogFeature::HttpServer => "http_server",
            LogFeature::Database => "database",
            LogFeature::Assets => "assets",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|feature| feature.name() == name)
    }
}

// Schema-specific logging macros
#[macro_export]
macro_rules! log_schema_debug {
    ($($arg:tt)*) => {
        log::debug!(target: "slicecms::schema", $($arg)*)
    };
}

#[macro_export]
macro_rules! log_schema_info {
    ($($arg:tt)*) => {
        log::info!(target: "slicecms::schema", $($arg)*)
    };
}

#[macro_export]
macro_rules! log_schema_warn {
    ($($arg:tt)*) => {
        log::warn!(target: "slicecms::schema", $($arg)*)
    };
}

// Webhook-specific logging macros
#[macro_export]
macro_rules! log_webhook_debug {
    ($($arg:tt)*) => {
        log::debug!(target: "slicecms::webhook", $($arg)*)
    };
}

#[macro_export]
macro_rules! log_webhook_info {
    ($($arg:tt)*) => {
        log::info!(target: "slicecms::webhook", $($arg)*)
    };
}

#[macro_export]
macro_rules! log_webhook_warn {
    ($($arg:tt)*) => {
        log::warn!(target: "slicecms::webhook", $($arg)*)
    };
}

#[macro_export]
macro_rules! log_webhook_error {
    ($($arg:tt)*) => {
        log::error!(target: "slicecms::webhook", $($arg)*)
    };
}

// HTTP Server-specific logging macros
#[macro_export]
macro_rules! log_http_info {
    ($($arg:tt)*) => {
        log::info!(target: "slicecms::http_server", $($arg)*)
    };
}

#[macro_export]
macro_rules! log_http_warn {
    ($($arg:tt)*) => {
        log::warn!(target: "slicecms::http_server", $($arg)*)
    };
}

#[macro_export]
macro_rules! log_http_error {
    ($($arg:tt)*) => {
        log::error!(target: "slicecms::http_server", $($arg)*)
    };
}

// Database-specific logging macros
#[macro_export]
macro_rules! log_database_info {
    ($($arg:tt)*) => {
        log::info!(target: "slicecms::database", $($arg)*)
    };
}

#[macro_export]
macro_rules! log_database_error {
    ($($arg:tt)*) => {
        log::error!(target: "slicecms::database", $($arg)*)
    };
}

// Asset-specific logging macros
#[macro_export]
macro_rules! log_assets_debug {
    ($($arg:tt)*) => {
        log::debug!(target: "slicecms::assets", $($arg)*)
    };
}

#[macro_export]
macro_rules! log_assets_info {
    ($($arg:tt)*) => {
        log::info!(target: "slicecms::assets", $($arg)*)
    };
}

#[macro_export]
macro_rules! log_assets_warn {
    ($($arg:tt)*) => {
        log::warn!(target: "slicecms::assets", $($arg)*)
    };
}
