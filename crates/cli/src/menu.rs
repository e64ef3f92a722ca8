use std::io::{self, BufRead, Write};
use std::sync::Arc;

use service::user::repository::UserRepository;
use service::{ServiceError, UserService};
use thiserror::Error;
use tracing::{error, info, warn};

const MENU: &str = "Choose an operation\n\
1. Add a new user\n\
2. Show a user\n\
3. Update a user\n\
4. Delete a user\n\
5. Exit\n";

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("Invalid id format: {0}")]
    InvalidId(String),
    #[error("console io: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Create,
    Get,
    Update,
    Delete,
    Exit,
}

impl MenuItem {
    fn parse(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(MenuItem::Create),
            "2" => Some(MenuItem::Get),
            "3" => Some(MenuItem::Update),
            "4" => Some(MenuItem::Delete),
            "5" => Some(MenuItem::Exit),
            _ => None,
        }
    }
}

/// One line without its terminator; `None` at end of input.
fn read_line<I: BufRead>(input: &mut I) -> io::Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    let trimmed = buf.trim_end_matches(['\r', '\n']).len();
    buf.truncate(trimmed);
    Ok(Some(buf))
}

fn parse_id(raw: &str) -> Result<i32, ConsoleError> {
    raw.trim().parse::<i32>().map_err(|_| ConsoleError::InvalidId(raw.to_string()))
}

pub struct ConsoleMenu<R: UserRepository> {
    users: Arc<UserService<R>>,
}

impl<R: UserRepository> ConsoleMenu<R> {
    pub fn new(users: Arc<UserService<R>>) -> Self { Self { users } }

    /// Show the menu until the user picks exit or input ends. Service and id
    /// errors are reported and the loop goes on; only I/O errors stop it.
    pub async fn run<I: BufRead, O: Write>(&self, input: &mut I, out: &mut O) -> Result<(), ConsoleError> {
        loop {
            writeln!(out, "{}", MENU)?;
            out.flush()?;
            let Some(choice) = read_line(input)? else { break };

            let item = match MenuItem::parse(&choice) {
                Some(MenuItem::Exit) => break,
                Some(item) => item,
                None => {
                    warn!(choice = %choice, "unknown menu id");
                    writeln!(out, "Unknown operation number: {}", choice)?;
                    continue;
                }
            };

            match self.dispatch(item, input, out).await {
                Ok(true) => writeln!(out)?,
                Ok(false) => break,
                Err(ConsoleError::Io(e)) => return Err(ConsoleError::Io(e)),
                Err(e) => {
                    error!(error = %e, "operation failed");
                    writeln!(out, "Error: {}", e)?;
                }
            }
        }
        info!("console closed");
        Ok(())
    }

    /// `Ok(false)` means input ended halfway through the prompts.
    async fn dispatch<I: BufRead, O: Write>(&self, item: MenuItem, input: &mut I, out: &mut O) -> Result<bool, ConsoleError> {
        match item {
            MenuItem::Create => {
                info!("creating new user");
                let Some(name) = prompt(input, out, "Enter name: ")? else { return Ok(false) };
                let Some(email) = prompt(input, out, "Enter email: ")? else { return Ok(false) };
                let user = self.users.create(Some(&name), Some(&email)).await?;
                writeln!(out, "Created user: {}", user)?;
            }
            MenuItem::Get => {
                info!("getting existing user");
                let Some(raw) = prompt(input, out, "Enter user id: ")? else { return Ok(false) };
                let user = self.users.get_by_id(parse_id(&raw)?).await?;
                writeln!(out, "Found user: {}", user)?;
            }
            MenuItem::Update => {
                info!("updating existing user");
                let Some(raw) = prompt(input, out, "Enter user id: ")? else { return Ok(false) };
                let id = parse_id(&raw)?;
                let Some(name) = prompt(input, out, "Enter new name: ")? else { return Ok(false) };
                let Some(email) = prompt(input, out, "Enter new email: ")? else { return Ok(false) };
                let user = self.users.update(id, Some(&name), Some(&email)).await?;
                writeln!(out, "Updated user: {}", user)?;
            }
            MenuItem::Delete => {
                info!("deleting existing user");
                let Some(raw) = prompt(input, out, "Enter user id: ")? else { return Ok(false) };
                let id = parse_id(&raw)?;
                self.users.delete_by_id(id).await?;
                writeln!(out, "Deleted user with id {}", id)?;
            }
            MenuItem::Exit => return Ok(false),
        }
        Ok(true)
    }
}

fn prompt<I: BufRead, O: Write>(input: &mut I, out: &mut O, label: &str) -> io::Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;
    read_line(input)
}
