//! Interactive session shell.
//!
//! One line of input per turn: `/`-prefixed lines are commands, anything
//! else is spoken with the current user's voice. A failed command is
//! reported and the loop keeps reading; only `/quit` or EOF ends the
//! session.

mod commands;

use std::io::Write as _;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::domain::speech::SpeechService;
use crate::domain::user::UserService;
use crate::error::{AppError, AppResult};
use crate::infrastructure::audio::AudioPlayer;

/// What the loop should do after a command.
pub(crate) enum ShellFlow {
    Continue,
    Quit,
}

pub struct Shell {
    speech: Arc<SpeechService>,
    users: Arc<UserService>,
    player: AudioPlayer,
}

impl Shell {
    pub fn new(speech: Arc<SpeechService>, users: Arc<UserService>, player: AudioPlayer) -> Self {
        Self {
            speech,
            users,
            player,
        }
    }

    pub async fn run(&self) -> AppResult<()> {
        println!("voicebox");
        println!("Type /help for commands, /quit to exit");
        println!();

        match self.users.current_user() {
            Ok(Some((_, user))) => println!("Current user: {}", user.name),
            Ok(None) => println!("No user configured. Use /add to create one."),
            Err(e) => return Err(e.into()),
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("> ");
            std::io::stdout()
                .flush()
                .map_err(|e| AppError::Internal(e.to_string()))?;

            let line = lines
                .next_line()
                .await
                .map_err(|e| AppError::Internal(e.to_string()))?;
            let Some(line) = line else { break }; // EOF
            let text = line.trim();
            if text.is_empty() {
                continue;
            }

            let outcome = match text.strip_prefix('/') {
                Some(command) => commands::dispatch(self, command).await,
                None => commands::speak_line(self, text)
                    .await
                    .map(|_| ShellFlow::Continue),
            };

            match outcome {
                Ok(ShellFlow::Quit) => break,
                Ok(ShellFlow::Continue) => {}
                // A failed command never ends the session.
                Err(err) => {
                    tracing::error!(error = %err, "Command failed");
                    println!("Error: {err}");
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }
}
