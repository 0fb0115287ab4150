mod cli;
mod config;
mod logging;
mod migrate_cmd;
mod output;
mod properties;
mod reservations;
mod search;
mod users;

use cli::{Command, PropertyCommand, UserCommand};
use config::{LoggingConfig, Settings};
use lightbnb_db::{DbError, GenericClient, SqlLogConfig, TracedClient};

pub async fn run(args: Vec<String>) -> anyhow::Result<()> {
    let cmd = cli::parse_args(&args)?;
    let connect = match (&cmd, cmd.connect_args()) {
        (Command::Help(topic), _) => {
            cli::print_help(*topic);
            return Ok(());
        }
        (Command::Search(args), _) if args.explain => return search::explain(args),
        (_, Some(connect)) => connect.clone(),
        (_, None) => return Ok(()),
    };

    let settings = Settings::load(&connect)?;
    logging::init(&settings.logging.level);

    let url = settings.require_database_url()?;
    let pool = lightbnb_db::create_pool_with_config(url, settings.max_connections)?;
    tracing::debug!(max_connections = settings.max_connections, "database pool ready");

    if let Command::Migrate(_) = cmd {
        return migrate_cmd::run(&pool).await;
    }

    let client = pool.get().await.map_err(DbError::from)?;
    if settings.logging.sql {
        let traced = TracedClient::with_config(client, sql_log_config(&settings.logging));
        dispatch(cmd, &traced).await
    } else {
        dispatch(cmd, &client).await
    }
}

async fn dispatch<C: GenericClient>(cmd: Command, client: &C) -> anyhow::Result<()> {
    match cmd {
        Command::Search(args) => search::run(client, &args).await,
        Command::User(UserCommand::Show(args)) => users::show(client, &args).await,
        Command::User(UserCommand::Add(args)) => users::add(client, &args).await,
        Command::Property(PropertyCommand::Add(args)) => properties::add(client, &args).await,
        Command::Reservations(args) => reservations::run(client, &args).await,
        Command::Help(_) | Command::Migrate(_) => Ok(()),
    }
}

/// Statements are logged at INFO so `logging.sql` shows them under the
/// default `info` filter.
fn sql_log_config(logging: &LoggingConfig) -> SqlLogConfig {
    let config = SqlLogConfig::new().level(tracing::Level::INFO);
    match logging.max_sql_length {
        0 => config.no_truncate(),
        n => config.max_sql_length(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sql_log_config_maps_zero_to_no_truncation() {
        let mut logging = LoggingConfig::default();
        assert_eq!(sql_log_config(&logging).max_sql_length, Some(200));

        logging.max_sql_length = 0;
        let config = sql_log_config(&logging);
        assert_eq!(config.max_sql_length, None);
        assert_eq!(config.level, tracing::Level::INFO);
    }

    #[tokio::test]
    async fn help_and_explain_need_no_database() {
        let argv = |args: &[&str]| -> Vec<String> {
            std::iter::once("lightbnb")
                .chain(args.iter().copied())
                .map(str::to_string)
                .collect()
        };
        run(argv(&["--help"])).await.unwrap();
        run(argv(&["search", "--city", "vancouver", "--min-rating", "4", "--explain"]))
            .await
            .unwrap();
    }
}
