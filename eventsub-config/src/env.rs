// Environment variable loading

use crate::Result;
use std::collections::HashMap;
use std::env;

/// Environment variable loader.
///
/// With a prefix of `EVENTSUB`, the variable `EVENTSUB_CLIENT_ID` is read as
/// the key `client_id`. Variables without the prefix are ignored.
#[derive(Debug, Clone, Default)]
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    /// Create a new environment loader
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Load all matching variables from the process environment
    pub fn load(&self) -> Result<HashMap<String, String>> {
        Ok(self.collect(env::vars()))
    }

    /// Apply the prefix filter to any set of variables
    pub fn collect<I>(&self, vars: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        vars.into_iter()
            .filter_map(|(key, value)| {
                let key = match &self.prefix {
                    Some(prefix) => key
                        .strip_prefix(prefix.as_str())?
                        .strip_prefix('_')?
                        .to_string(),
                    None => key,
                };
                Some((key.to_lowercase(), value))
            })
            .collect()
    }
}
