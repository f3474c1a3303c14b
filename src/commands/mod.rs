// Interactive command layer
pub mod render;

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

use crate::core::SearchResults;
use crate::models::{same_name, ManualEntry, Place, StateCode, TownId};
use crate::services::{CensusClient, CensusError, DatasetStatus, LoadOutcome, LoadTicket};
use crate::session::{Session, QUICK_TOWNS};

pub use render::{format_count, format_money, render_places, render_totals, render_town};

pub const HELP: &str = "\
Commands:
  state <XX>                          select a state and load its places
  search <text>                       search places in the selected state
  add <n>                             add result <n> of the last search
  manual <name> | <pop> [| <income>]  add a town by hand
  quick [<name>]                      list or add a well-known town
  remove <n|id>                       remove a town by position or id prefix
  list                                show all towns with their fee drain
  totals                              show combined totals
  report                              print a JSON summary
  help                                show this help
  quit                                exit
";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

/// A parsed line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    State(String),
    Search(String),
    Add(usize),
    Manual {
        name: String,
        population: String,
        income: Option<String>,
    },
    Quick(Option<String>),
    Remove(String),
    List,
    Totals,
    Report,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line; blank lines give `None`
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };

        let command = match keyword.to_lowercase().as_str() {
            "state" | "s" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage("state <XX>"));
                }
                Command::State(rest.to_string())
            }
            "search" | "find" | "/" => Command::Search(rest.to_string()),
            "add" | "a" => {
                let position = rest
                    .parse::<usize>()
                    .map_err(|_| CommandError::Usage("add <n>"))?;
                Command::Add(position)
            }
            "manual" | "m" => {
                let mut fields = rest.split('|').map(str::trim);
                let name = fields.next().unwrap_or_default().to_string();
                let population = fields.next().unwrap_or_default().to_string();
                let income = fields.next().map(str::to_string);
                Command::Manual { name, population, income }
            }
            "quick" | "q" => Command::Quick((!rest.is_empty()).then(|| rest.to_string())),
            "remove" | "rm" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage("remove <n|id>"));
                }
                Command::Remove(rest.to_string())
            }
            "list" | "ls" => Command::List,
            "totals" => Command::Totals,
            "report" => Command::Report,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

/// Result of a fetch spawned by the shell
#[derive(Debug)]
pub enum Event {
    Loaded {
        ticket: LoadTicket,
        result: Result<Vec<Place>, CensusError>,
    },
    QuickAdd {
        name: String,
        state: StateCode,
        result: Result<Vec<Place>, CensusError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Quit,
}

/// Drives a `Session` from parsed commands
///
/// Fetches run as spawned tasks and come back as `Event`s on the channel
/// given to `new`; the owner feeds them to `handle_event`.
pub struct Shell {
    session: Session,
    client: Arc<CensusClient>,
    events: UnboundedSender<Event>,
    last_results: Vec<Place>,
}

impl Shell {
    pub fn new(session: Session, client: Arc<CensusClient>, events: UnboundedSender<Event>) -> Self {
        Self {
            session,
            client,
            events,
            last_results: Vec::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Start loading the places of `state` in the background
    pub fn start_load(&mut self, state: StateCode) -> String {
        let ticket = self.session.load(state);
        self.last_results.clear();

        let client = Arc::clone(&self.client);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = client.fetch_state_places(ticket.state()).await;
            // The receiver only goes away on shutdown
            let _ = events.send(Event::Loaded { ticket, result });
        });

        format!("Loading {} places from Census...\n", state)
    }

    pub fn execute(&mut self, command: Command) -> Reply {
        let output = match command {
            Command::State(code) => match code.parse::<StateCode>() {
                Ok(state) => self.start_load(state),
                Err(err) => format!("{}\n", err),
            },
            Command::Search(query) => self.search(&query),
            Command::Add(position) => self.add_result(position),
            Command::Manual { name, population, income } => {
                match ManualEntry::parse(&name, &population, income.as_deref())
                    .map_err(Into::into)
                    .and_then(|entry| self.session.add_manual(entry))
                {
                    Ok(id) => self.render_added(id),
                    Err(err) => format!("{}\n", err),
                }
            }
            Command::Quick(None) => self.list_quick_towns(),
            Command::Quick(Some(name)) => self.quick_add(&name),
            Command::Remove(target) => self.remove(&target),
            Command::List => self.list(),
            Command::Totals => render_totals(&self.session.aggregate()),
            Command::Report => match serde_json::to_string_pretty(&self.session.summary()) {
                Ok(json) => format!("{}\n", json),
                Err(err) => format!("Failed to build report: {}\n", err),
            },
            Command::Help => HELP.to_string(),
            Command::Quit => return Reply::Quit,
        };

        Reply::Output(output)
    }

    pub fn handle_event(&mut self, event: Event) -> String {
        match event {
            Event::Loaded { ticket, result } => match self.session.apply_load(ticket, result) {
                LoadOutcome::Loaded(count) => {
                    format!("{} places loaded for {} from Census ACS\n", count, ticket.state())
                }
                LoadOutcome::Failed(err) => {
                    format!("Failed to load {} places: {}\n", ticket.state(), err)
                }
                LoadOutcome::Stale => String::new(),
            },
            Event::QuickAdd { name, state, result } => {
                match self.session.complete_quick_add(&name, state, result) {
                    Ok(id) => self.render_added(id),
                    Err(err) => {
                        tracing::warn!("Quick add of {}, {} failed: {}", name, state, err);
                        format!("Quick add failed: {}\n", err)
                    }
                }
            }
        }
    }

    fn search(&mut self, query: &str) -> String {
        let state = self.session.state();
        match self.session.dataset_status() {
            DatasetStatus::Ready(loaded) if *loaded == state => {}
            DatasetStatus::Failed { state: failed, message } if *failed == state => {
                return format!(
                    "Loading {} places failed: {}\nRun `state {}` to try again.\n",
                    state, message, state
                );
            }
            _ => return format!("{} places are not loaded yet\n", state),
        }

        let places = match self.session.search(query) {
            SearchResults::Idle => Vec::new(),
            SearchResults::NoMatches => {
                self.last_results.clear();
                return "No matches found. Make sure you selected the correct state.\n".to_string();
            }
            SearchResults::Matches(places) => places.into_iter().cloned().collect(),
        };

        self.last_results = places;
        render_places(&self.last_results)
    }

    fn add_result(&mut self, position: usize) -> String {
        let Some(place) = position
            .checked_sub(1)
            .and_then(|index| self.last_results.get(index))
            .cloned()
        else {
            return format!("No search result #{}\n", position);
        };

        match self.session.add_place(&place) {
            Ok(id) => self.render_added(id),
            Err(err) => format!("{}\n", err),
        }
    }

    fn list_quick_towns(&self) -> String {
        let mut out = String::from("Try these towns:\n");
        for (name, state) in QUICK_TOWNS {
            let marker = if self.session.has_town(name, state) { " (added)" } else { "" };
            out.push_str(&format!("  {}, {}{}\n", name, state, marker));
        }
        out
    }

    fn quick_add(&mut self, name: &str) -> String {
        let Some((name, state)) = QUICK_TOWNS
            .iter()
            .copied()
            .find(|(candidate, _)| same_name(candidate, name.trim()))
        else {
            return format!("{} is not on the quick-add list (try `quick`)\n", name);
        };

        if let Err(err) = self.session.begin_quick_add(name, state) {
            return format!("{}\n", err);
        }

        let client = Arc::clone(&self.client);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = client.fetch_state_places(state).await;
            let _ = events.send(Event::QuickAdd {
                name: name.to_string(),
                state,
                result,
            });
        });

        format!("Looking up {}, {}...\n", name, state)
    }

    fn remove(&mut self, target: &str) -> String {
        match self.resolve_town(target) {
            Some(id) => match self.session.remove(id) {
                Some(town) => format!("Removed {}, {}\n", town.name, town.state),
                None => String::new(),
            },
            None => format!("No town matches {:?}\n", target),
        }
    }

    /// Find a town by 1-based list position or unambiguous id prefix
    fn resolve_town(&self, target: &str) -> Option<TownId> {
        let towns = self.session.towns();

        if let Ok(position) = target.parse::<usize>() {
            if let Some(town) = position.checked_sub(1).and_then(|index| towns.get(index)) {
                return Some(town.id);
            }
        }

        let prefix = target.to_lowercase().replace('-', "");
        if prefix.is_empty() {
            return None;
        }
        let mut matches = towns.iter().filter(|town| town.id.simple().starts_with(&prefix));
        match (matches.next(), matches.next()) {
            (Some(town), None) => Some(town.id),
            _ => None,
        }
    }

    fn list(&self) -> String {
        let towns = self.session.towns();
        if towns.is_empty() {
            return "Search for a town to see the drain\n".to_string();
        }

        let mut out = String::new();
        for (i, town) in towns.iter().enumerate() {
            out.push_str(&render_town(i + 1, town, &self.session.estimate(town)));
        }
        if towns.len() > 1 {
            out.push_str(&render_totals(&self.session.aggregate()));
        }
        out
    }

    fn render_added(&self, id: TownId) -> String {
        let towns = self.session.towns();
        match towns.iter().position(|town| town.id == id) {
            Some(index) => render_town(index + 1, &towns[index], &self.session.estimate(&towns[index])),
            None => String::new(),
        }
    }
}
