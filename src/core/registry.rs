//! Named logger registry
//!
//! The host application creates one registry at startup and passes it (or
//! the loggers it hands out) to whatever needs them. There is no global
//! instance.

use super::{
    config::LoggerConfig,
    error::{LoggerError, Result},
    logger::{Logger, ROOT_LOGGER_NAME},
};
use crate::appenders::ConsoleAppender;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

pub struct LoggerRegistry {
    root: Arc<Logger>,
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
}

impl LoggerRegistry {
    pub fn new(root: Logger) -> Self {
        Self {
            root: Arc::new(root),
            loggers: RwLock::new(HashMap::new()),
        }
    }

    /// Registry whose root logger writes to standard output
    pub fn with_console_root() -> Self {
        let root = Logger::root();
        root.add_appender(Arc::new(ConsoleAppender::new()));
        Self::new(root)
    }

    /// Build every configured logger. A configuration named `root` becomes
    /// the root logger; otherwise a console root is created.
    pub fn from_configs(configs: &[LoggerConfig]) -> Result<Self> {
        let mut root = None;
        let mut named = HashMap::new();

        for config in configs {
            let logger = config.build()?;
            let duplicate = if config.name == ROOT_LOGGER_NAME {
                root.replace(logger).is_some()
            } else {
                named.insert(config.name.clone(), Arc::new(logger)).is_some()
            };
            if duplicate {
                return Err(LoggerError::config(
                    "logger registry",
                    format!("logger '{}' is configured twice", config.name),
                ));
            }
        }

        let registry = match root {
            Some(root) => Self::new(root),
            None => Self::with_console_root(),
        };
        *registry.loggers.write() = named;
        Ok(registry)
    }

    pub fn root(&self) -> Arc<Logger> {
        Arc::clone(&self.root)
    }

    /// Add `logger`, replacing (and returning) any logger with the same name.
    pub fn register(&self, logger: Logger) -> Option<Arc<Logger>> {
        let name = logger.name().to_string();
        self.loggers.write().insert(name, Arc::new(logger))
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<Logger>> {
        if name == ROOT_LOGGER_NAME {
            return Some(self.root());
        }
        self.loggers.read().get(name).cloned()
    }

    /// Return the logger called `name`, creating it from the root's level,
    /// default formatter and appenders if it does not exist yet.
    pub fn get_or_create(&self, name: &str) -> Arc<Logger> {
        if let Some(logger) = self.lookup(name) {
            return logger;
        }

        let mut loggers = self.loggers.write();
        let logger = loggers.entry(name.to_string()).or_insert_with(|| {
            let logger = Logger::builder()
                .name(name)
                .level(self.root.level())
                .formatter(self.root.formatter())
                .build();
            for appender in self.root.appenders() {
                logger.add_appender(appender);
            }
            Arc::new(logger)
        });
        Arc::clone(logger)
    }

    /// Names of all non-root loggers, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::with_console_root()
    }
}
