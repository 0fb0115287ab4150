use lightbnb_db::{FilterSpec, NewProperty, NewUser};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Search,
    User,
    Property,
    Reservations,
    Migrate,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help(HelpTopic),
    Search(SearchArgs),
    User(UserCommand),
    Property(PropertyCommand),
    Reservations(ReservationsArgs),
    Migrate(ConnectArgs),
}

/// Flags shared by every command that talks to the database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectArgs {
    /// `None` means the optional default `lightbnb.toml`.
    pub config: Option<PathBuf>,
    pub database: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SearchArgs {
    pub connect: ConnectArgs,
    pub filter: FilterSpec,
    pub limit: Option<i64>,
    pub explain: bool,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub enum UserCommand {
    Show(UserShowArgs),
    Add(UserAddArgs),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserKey {
    Email(String),
    Id(i32),
}

#[derive(Debug, Clone)]
pub struct UserShowArgs {
    pub connect: ConnectArgs,
    pub key: UserKey,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct UserAddArgs {
    pub connect: ConnectArgs,
    pub user: NewUser,
}

#[derive(Debug, Clone)]
pub enum PropertyCommand {
    Add(PropertyAddArgs),
}

#[derive(Debug, Clone)]
pub struct PropertyAddArgs {
    pub connect: ConnectArgs,
    pub property: NewProperty,
}

#[derive(Debug, Clone)]
pub struct ReservationsArgs {
    pub connect: ConnectArgs,
    pub guest_id: i32,
    pub limit: Option<i64>,
    pub json: bool,
}

impl Command {
    pub fn connect_args(&self) -> Option<&ConnectArgs> {
        match self {
            Command::Help(_) => None,
            Command::Search(args) => Some(&args.connect),
            Command::User(UserCommand::Show(args)) => Some(&args.connect),
            Command::User(UserCommand::Add(args)) => Some(&args.connect),
            Command::Property(PropertyCommand::Add(args)) => Some(&args.connect),
            Command::Reservations(args) => Some(&args.connect),
            Command::Migrate(args) => Some(args),
        }
    }
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    // `--flag=value` is accepted everywhere and treated as `--flag value`.
    let tokens: Vec<&str> = args
        .iter()
        .skip(1)
        .flat_map(|arg| match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => vec![flag, value],
            _ => vec![arg.as_str()],
        })
        .collect();

    let mut it = tokens.into_iter();
    let Some(first) = it.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    match first {
        "-h" | "--help" | "help" => Ok(Command::Help(HelpTopic::Root)),
        "search" => parse_search(it),
        "user" => parse_user(it),
        "property" => parse_property(it),
        "reservations" => parse_reservations(it),
        "migrate" => parse_migrate(it),
        _ => anyhow::bail!("unknown command: {first}"),
    }
}

fn value<'a>(it: &mut impl Iterator<Item = &'a str>, flag: &str) -> anyhow::Result<&'a str> {
    let Some(v) = it.next() else {
        anyhow::bail!("{flag} requires a value");
    };
    Ok(v)
}

fn number<'a, T: FromStr>(it: &mut impl Iterator<Item = &'a str>, flag: &str) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    let v = value(it, flag)?;
    v.parse()
        .map_err(|e| anyhow::anyhow!("invalid value for {flag}: {v} ({e})"))
}

/// Consume `--config` / `--database`; returns false for any other token.
fn connect_flag<'a>(
    token: &str,
    it: &mut impl Iterator<Item = &'a str>,
    connect: &mut ConnectArgs,
) -> anyhow::Result<bool> {
    match token {
        "--config" => connect.config = Some(PathBuf::from(value(it, token)?)),
        "--database" => connect.database = Some(value(it, token)?.to_string()),
        _ => return Ok(false),
    }
    Ok(true)
}

fn parse_search<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut connect = ConnectArgs::default();
    let mut flags = FilterSpec::new();
    let mut base: Option<FilterSpec> = None;
    let mut limit = None;
    let mut explain = false;
    let mut json = false;

    while let Some(token) = it.next() {
        if connect_flag(token, &mut it, &mut connect)? {
            continue;
        }
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Search)),
            "--city" => flags = flags.city_containing(value(&mut it, token)?),
            "--owner-id" => flags = flags.owner_id(number(&mut it, token)?),
            "--min-price" => flags = flags.min_price_per_night(number(&mut it, token)?),
            "--max-price" => flags = flags.max_price_per_night(number(&mut it, token)?),
            "--min-rating" => {
                let rating: Decimal = number(&mut it, token)?;
                flags = flags.min_rating(rating);
            }
            "--filter" => {
                let raw = value(&mut it, token)?;
                let parsed: FilterSpec = serde_json::from_str(raw)
                    .map_err(|e| anyhow::anyhow!("invalid --filter JSON: {e}"))?;
                base = Some(parsed);
            }
            "--limit" => limit = Some(number(&mut it, token)?),
            "--explain" => explain = true,
            "--json" => json = true,
            _ => anyhow::bail!("unexpected argument for search: {token}"),
        }
    }

    let filter = match base {
        Some(base) => flags.or(base),
        None => flags,
    };

    Ok(Command::Search(SearchArgs {
        connect,
        filter,
        limit,
        explain,
        json,
    }))
}

fn parse_user<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut subcmd: Option<&str> = None;
    let mut connect = ConnectArgs::default();
    let mut email: Option<String> = None;
    let mut id: Option<i32> = None;
    let mut name: Option<String> = None;
    let mut password: Option<String> = None;
    let mut json = false;

    while let Some(token) = it.next() {
        if connect_flag(token, &mut it, &mut connect)? {
            continue;
        }
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::User)),
            "show" | "add" if subcmd.is_none() => subcmd = Some(token),
            "--email" => email = Some(value(&mut it, token)?.to_string()),
            "--id" => id = Some(number(&mut it, token)?),
            "--name" => name = Some(value(&mut it, token)?.to_string()),
            "--password" => password = Some(value(&mut it, token)?.to_string()),
            "--json" => json = true,
            _ => anyhow::bail!("unexpected argument for user: {token}"),
        }
    }

    match subcmd {
        Some("show") => {
            let key = match (email, id) {
                (Some(email), None) => UserKey::Email(email),
                (None, Some(id)) => UserKey::Id(id),
                (Some(_), Some(_)) => anyhow::bail!("user show takes --email or --id, not both"),
                (None, None) => anyhow::bail!("user show requires --email or --id"),
            };
            Ok(Command::User(UserCommand::Show(UserShowArgs { connect, key, json })))
        }
        Some(_) => {
            let Some(name) = name else {
                anyhow::bail!("user add requires --name");
            };
            let Some(email) = email else {
                anyhow::bail!("user add requires --email");
            };
            let Some(password) = password else {
                anyhow::bail!("user add requires --password");
            };
            Ok(Command::User(UserCommand::Add(UserAddArgs {
                connect,
                user: NewUser {
                    name,
                    email,
                    password,
                },
            })))
        }
        None => Ok(Command::Help(HelpTopic::User)),
    }
}

fn parse_property<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut subcmd: Option<&str> = None;
    let mut connect = ConnectArgs::default();
    let mut property: Option<NewProperty> = None;

    while let Some(token) = it.next() {
        if connect_flag(token, &mut it, &mut connect)? {
            continue;
        }
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Property)),
            "add" if subcmd.is_none() => subcmd = Some(token),
            "--json" => {
                let raw = value(&mut it, token)?;
                property = Some(
                    serde_json::from_str(raw)
                        .map_err(|e| anyhow::anyhow!("invalid property JSON: {e}"))?,
                );
            }
            _ => anyhow::bail!("unexpected argument for property: {token}"),
        }
    }

    if subcmd.is_none() {
        return Ok(Command::Help(HelpTopic::Property));
    }
    let Some(property) = property else {
        anyhow::bail!("property add requires --json");
    };
    Ok(Command::Property(PropertyCommand::Add(PropertyAddArgs {
        connect,
        property,
    })))
}

fn parse_reservations<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut connect = ConnectArgs::default();
    let mut guest_id: Option<i32> = None;
    let mut limit = None;
    let mut json = false;

    while let Some(token) = it.next() {
        if connect_flag(token, &mut it, &mut connect)? {
            continue;
        }
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Reservations)),
            "--guest-id" => guest_id = Some(number(&mut it, token)?),
            "--limit" => limit = Some(number(&mut it, token)?),
            "--json" => json = true,
            _ => anyhow::bail!("unexpected argument for reservations: {token}"),
        }
    }

    let Some(guest_id) = guest_id else {
        anyhow::bail!("reservations requires --guest-id");
    };
    Ok(Command::Reservations(ReservationsArgs {
        connect,
        guest_id,
        limit,
        json,
    }))
}

fn parse_migrate<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut connect = ConnectArgs::default();

    while let Some(token) = it.next() {
        if connect_flag(token, &mut it, &mut connect)? {
            continue;
        }
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Migrate)),
            _ => anyhow::bail!("unexpected argument for migrate: {token}"),
        }
    }

    Ok(Command::Migrate(connect))
}

const CONNECT_OPTIONS: &str = "\
CONNECTION OPTIONS:
  --config <FILE>       Config file path (default: lightbnb.toml, optional)
  --database <URL>      Override database.url from config and DATABASE_URL
  -h, --help            Print help";

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
lightbnb - query and maintain the LightBnB database

USAGE:
  lightbnb <COMMAND> [OPTIONS]

COMMANDS:
  search          Search properties by city, owner, price and rating
  user            Show or add users
  property        Add a property listing
  reservations    List a guest's reservations
  migrate         Apply the embedded schema migrations

Run `lightbnb <command> --help` for more."
            );
        }
        HelpTopic::Search => {
            println!(
                "\
USAGE:
  lightbnb search [OPTIONS]

SEARCH OPTIONS:
  --city <TEXT>         City whose name contains TEXT once each word of TEXT
                        is capitalized; the match is case-sensitive, so
                        'vancouver' finds Vancouver but 'couver' does not
  --owner-id <N>        Properties owned by user N
  --min-price <N>       Minimum cost per night
  --max-price <N>       Maximum cost per night
  --min-rating <R>      Minimum average review rating
  --filter <JSON>       Filter object; the flags above override its fields
  --limit <N>           Maximum rows (default: 10)
  --explain             Print the SQL and bind values without connecting
  --json                Print results as JSON

{CONNECT_OPTIONS}"
            );
        }
        HelpTopic::User => {
            println!(
                "\
USAGE:
  lightbnb user show (--email <EMAIL> | --id <N>) [--json]
  lightbnb user add --name <NAME> --email <EMAIL> --password <PASSWORD>

{CONNECT_OPTIONS}"
            );
        }
        HelpTopic::Property => {
            println!(
                "\
USAGE:
  lightbnb property add --json <JSON>

The JSON object carries owner_id, title, description, thumbnail_photo_url,
cover_photo_url, cost_per_night, street, city, province, post_code, country,
parking_spaces, number_of_bathrooms and number_of_bedrooms.

{CONNECT_OPTIONS}"
            );
        }
        HelpTopic::Reservations => {
            println!(
                "\
USAGE:
  lightbnb reservations --guest-id <N> [--limit <N>] [--json]

{CONNECT_OPTIONS}"
            );
        }
        HelpTopic::Migrate => {
            println!(
                "\
USAGE:
  lightbnb migrate

Applies every pending embedded migration.

{CONNECT_OPTIONS}"
            );
        }
    }
}
