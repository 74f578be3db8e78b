use config::{Config, ConfigError, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings{
    pub application: ApplicationSettings,
    pub database: DatabaseSettings
}

#[derive(Deserialize, Debug)]
pub struct ApplicationSettings{
    pub log_level: String,
    pub log_file: Option<String>
}

#[derive(Deserialize, Debug)]
pub struct DatabaseSettings{
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub name: String
}

impl Settings{
    // Defaults < configuration/base.yaml < PIZZASTORE__* environment variables
    pub fn get() -> Result<Self, ConfigError>{
        Config::builder()
            .set_default("application.log_level", "info")?
            .set_default("database.host", "localhost")?
            .set_default("database.port", 5432)?
            .set_default("database.username", "postgres")?
            .set_default("database.password", "")?
            .set_default("database.name", "pizzastore")?
            .add_source(File::with_name("configuration/base.yaml").required(false))
            .add_source(
                Environment::with_prefix("PIZZASTORE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
            )
            .build()?
            .try_deserialize::<Settings>()
    }
}

impl DatabaseSettings{
    pub fn connection_url(&self) -> String{
        format!("{}/{}", self.server_url(), self.name)
    }

    // Url of the server's default database, used to create and drop databases
    pub fn maintenance_url(&self) -> String{
        format!("{}/postgres", self.server_url())
    }

    fn server_url(&self) -> String{
        let password = self.password.expose_secret();
        if password.is_empty() {
            format!("postgres://{}@{}:{}", self.username, self.host, self.port)
        } else {
            format!("postgres://{}:{}@{}:{}", self.username, password, self.host, self.port)
        }
    }
}
