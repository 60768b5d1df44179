//! Interactive session
//!
//! Reads one request per line from stdin. A plain line is a city search;
//! lines starting with `:` are commands. The cache and the recent-search
//! list live for the whole session.

use application::WeatherSession;
use domain::GeoLocation;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

use crate::render::{self, JsonReport, UnitLabels};

pub const HELP: &str = "\
Enter a city name to search, or one of:
  :coords <LAT> <LON>   weather at a position
  :recent               list recent searches
  :last                 repeat the most recent search
  :<N>                  repeat recent search number N (1 = newest)
  :stats                cache counters and freshness windows
  :help                 this text
  :quit                 leave";

/// One parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Search(String),
    Coords(f64, f64),
    Recent,
    Last,
    Pick(usize),
    Stats,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

/// Parse a line of input
pub fn parse_line(line: &str) -> ReplCommand {
    let line = line.trim();
    if line.is_empty() {
        return ReplCommand::Empty;
    }
    let Some(command) = line.strip_prefix(':') else {
        return ReplCommand::Search(line.to_string());
    };

    let mut parts = command.split_whitespace();
    match parts.next().unwrap_or_default() {
        "coords" | "c" => {
            let lat = parts.next().and_then(|v| v.parse::<f64>().ok());
            let lon = parts.next().and_then(|v| v.parse::<f64>().ok());
            match (lat, lon, parts.next()) {
                (Some(lat), Some(lon), None) => ReplCommand::Coords(lat, lon),
                _ => ReplCommand::Invalid("usage: :coords <LAT> <LON>".to_string()),
            }
        },
        "recent" | "r" => ReplCommand::Recent,
        "last" | "l" => ReplCommand::Last,
        "stats" => ReplCommand::Stats,
        "help" | "h" | "?" => ReplCommand::Help,
        "quit" | "q" | "exit" => ReplCommand::Quit,
        other => match other.parse::<usize>() {
            Ok(n) if n >= 1 => ReplCommand::Pick(n - 1),
            _ => ReplCommand::Invalid(format!("unknown command :{other} (try :help)")),
        },
    }
}

/// Output options for the session
#[derive(Debug, Clone, Copy)]
pub struct ReplOptions {
    pub json: bool,
    pub units: UnitLabels,
}

/// Run the read-eval-print loop until EOF or `:quit`
pub async fn run(session: &WeatherSession, options: ReplOptions) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout.write_all(b"skycast interactive, :help for commands\n").await?;
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = parse_line(&line);
        debug!(?command, "Interactive input");

        let output = match command {
            ReplCommand::Quit => break,
            ReplCommand::Empty => continue,
            ReplCommand::Help => vec![HELP.to_string()],
            ReplCommand::Invalid(message) => vec![message],
            ReplCommand::Stats => {
                let gateway = session.gateway();
                vec![render::stats_line(&gateway.stats(), gateway.ttls())]
            },
            ReplCommand::Recent => recent_lines(&session.recent_cities()),
            ReplCommand::Search(city) => report_output(session.search_city(&city).await, options)?,
            ReplCommand::Coords(lat, lon) => match GeoLocation::new(lat, lon) {
                Ok(location) => report_output(session.locate(location).await, options)?,
                Err(e) => vec![format!("error: {e}")],
            },
            ReplCommand::Last => match session.resume().await {
                Some(result) => report_output(result, options)?,
                None => vec!["no recent searches".to_string()],
            },
            ReplCommand::Pick(index) => match session.pick_recent(index).await {
                Some(result) => report_output(result, options)?,
                None => vec![format!("no recent search number {}", index + 1)],
            },
        };

        for line in output {
            stdout.write_all(line.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
        }
    }
    stdout.flush().await?;
    Ok(())
}

fn recent_lines(cities: &[String]) -> Vec<String> {
    if cities.is_empty() {
        return vec!["no recent searches".to_string()];
    }
    cities
        .iter()
        .enumerate()
        .map(|(i, city)| format!("{:>2}. {city}", i + 1))
        .collect()
}

fn report_output(
    result: Result<application::WeatherReport, application::ApplicationError>,
    options: ReplOptions,
) -> anyhow::Result<Vec<String>> {
    Ok(match result {
        Ok(report) if options.json => {
            vec![serde_json::to_string(&JsonReport::from(&report))?]
        },
        Ok(report) => render::report_lines(&report, options.units),
        Err(e) => vec![format!("error: {e}")],
    })
}
