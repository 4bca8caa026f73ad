use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Vars;

fn default_port() -> u16 {
    8080
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct WebConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Production binds every interface and logs less
    pub production: bool,
    #[serde(skip_serializing)]
    pub secret_key: String,
    /// True when SECRET_KEY was absent and an ephemeral key was generated
    #[serde(skip)]
    pub secret_key_generated: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            production: false,
            secret_key: ephemeral_secret(),
            secret_key_generated: true,
        }
    }
}

impl WebConfig {
    pub(crate) fn from_vars<F>(vars: &Vars<F>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let production = vars
            .string("APP_ENV")
            .is_some_and(|v| v.eq_ignore_ascii_case("production"));

        let (secret_key, secret_key_generated) = match vars.string("SECRET_KEY") {
            Some(key) => (key, false),
            None => (ephemeral_secret(), true),
        };

        Self {
            port: vars.parse_or("PORT", default_port()),
            production,
            secret_key,
            secret_key_generated,
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        let ip = if self.production {
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        } else {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        };
        SocketAddr::new(ip, self.port)
    }

    pub fn default_log_level(&self) -> &'static str {
        if self.production { "info" } else { "debug" }
    }
}

/// 16 random bytes, hex encoded
fn ephemeral_secret() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    hex::encode(bytes)
}
