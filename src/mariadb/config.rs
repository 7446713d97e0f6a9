use mysql::{Opts, OptsBuilder};

/// Connection parameters for [`super::MariaDbConnection`].
#[derive(Debug, Clone)]
pub struct MariaDbConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    /// Initial database, if any.
    pub database: Option<String>,
    pub port: u16,
}

impl MariaDbConfig {
    /// Parameters for a server on the default port 3306.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            password: password.into(),
            database: None,
            port: 3306,
        }
    }

    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub(crate) fn opts(&self) -> Opts {
        OptsBuilder::new()
            .ip_or_hostname(Some(self.host.clone()))
            .tcp_port(self.port)
            .user(Some(self.user.clone()))
            .pass(Some(self.password.clone()))
            .db_name(self.database.clone())
            .into()
    }
}
