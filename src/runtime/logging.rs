use crate::runtime::callbacks::post_debug_log;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::Url;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    pub fn parse(level: &str) -> Self {
        match level {
            "debug" => LogLevel::Debug,
            "warn" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

#[async_trait]
pub trait Logger: Send + Sync {
    async fn log(&self, level: &str, message: &str, context: Option<serde_json::Value>);
}

fn emit_tracing(level: LogLevel, message: &str) {
    match level {
        LogLevel::Debug => tracing::debug!("[Import] {}", message),
        LogLevel::Info => tracing::info!("[Import] {}", message),
        LogLevel::Warn => tracing::warn!("[Import] {}", message),
        LogLevel::Error => tracing::error!("[Import] {}", message),
    }
}

fn is_local_callback_base(callback_base: &str) -> bool {
    let host = match Url::parse(callback_base) {
        Ok(url) => url.host_str().unwrap_or_default().to_string(),
        Err(_) => callback_base.to_string(),
    };

    host == "localhost" || host == "127.0.0.1" || host == "host.docker.internal"
}

/// Logs through `tracing` only.
pub struct TracingLogger;

#[async_trait]
impl Logger for TracingLogger {
    async fn log(&self, level: &str, message: &str, _context: Option<serde_json::Value>) {
        emit_tracing(LogLevel::parse(level), message);
    }
}

/// Logs through `tracing` and mirrors events to the callback API when it runs
/// on the local machine.
pub struct CallbackLogger {
    client: Client,
    callback_base: String,
    callback_token: String,
}

impl CallbackLogger {
    pub fn new(client: Client, callback_base: &str, callback_token: &str) -> Self {
        Self {
            client,
            callback_base: callback_base.to_string(),
            callback_token: callback_token.to_string(),
        }
    }
}

#[async_trait]
impl Logger for CallbackLogger {
    async fn log(&self, level: &str, message: &str, context: Option<serde_json::Value>) {
        let level = LogLevel::parse(level);
        emit_tracing(level, message);

        if is_local_callback_base(&self.callback_base) {
            post_debug_log(
                &self.client,
                &self.callback_base,
                &self.callback_token,
                level.as_str(),
                message,
                context,
            )
            .await;
        }
    }
}

/// Logs through `$ctx.logger`. Must be used inside an async context.
#[macro_export]
macro_rules! info {
    ($ctx:expr, $($arg:tt)*) => {
        $ctx.logger.log("info", &format!($($arg)*), None).await
    };
}

#[macro_export]
macro_rules! warn {
    ($ctx:expr, $($arg:tt)*) => {
        $ctx.logger.log("warn", &format!($($arg)*), None).await
    };
}

#[macro_export]
macro_rules! error {
    ($ctx:expr, $($arg:tt)*) => {
        $ctx.logger.log("error", &format!($($arg)*), None).await
    };
}

#[macro_export]
macro_rules! debug {
    ($ctx:expr, $($arg:tt)*) => {
        $ctx.logger.log("debug", &format!($($arg)*), None).await
    };
}
