//! Server configuration parsed from the command line and environment.

use std::net::{IpAddr, SocketAddr};

use clap::Parser;

/// Runtime configuration for the `larder` binary.
///
/// Every flag can also be supplied through the environment, which is how
/// container deployments configure the service.
#[derive(Debug, Clone, Parser)]
#[command(name = "larder", about = "Recipe catalog API server", long_about = None)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    #[arg(long, env = "LARDER_BIND_HOST", default_value = "0.0.0.0")]
    pub bind_host: IpAddr,

    /// Port the HTTP listener binds to.
    #[arg(long, env = "LARDER_BIND_PORT", default_value_t = 8080)]
    pub bind_port: u16,

    /// Email of a superuser created at startup when the password is also set.
    ///
    /// An existing account with this email is left untouched.
    #[arg(long, env = "LARDER_SUPERUSER_EMAIL")]
    pub superuser_email: Option<String>,

    /// Password for the bootstrap superuser.
    #[arg(long, env = "LARDER_SUPERUSER_PASSWORD", hide_env_values = true)]
    pub superuser_password: Option<String>,
}

impl ServerConfig {
    /// Return the socket address the server will bind to.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_host, self.bind_port)
    }

    /// Return the bootstrap superuser credentials when both halves are set.
    #[must_use]
    pub fn superuser_credentials(&self) -> Option<(&str, &str)> {
        match (
            self.superuser_email.as_deref(),
            self.superuser_password.as_deref(),
        ) {
            (Some(email), Some(password)) => Some((email, password)),
            _ => None,
        }
    }
}
