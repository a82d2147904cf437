use crate::domain::cache::CacheKey;
use crate::domain::speech::{AudioSource, PrecacheOutcome};
use crate::domain::user::{User, UserServiceError};
use crate::error::AppResult;

use super::{Shell, ShellFlow};

pub(super) async fn dispatch(shell: &Shell, input: &str) -> AppResult<ShellFlow> {
    let (cmd, args) = match input.split_once(char::is_whitespace) {
        Some((cmd, args)) => (cmd, args.trim()),
        None => (input, ""),
    };

    match cmd.to_lowercase().as_str() {
        "quit" | "exit" => return Ok(ShellFlow::Quit),
        "help" => print_help(),
        "users" => list_users(shell)?,
        "user" => switch_user(shell, args)?,
        "add" => add_user(shell, args)?,
        "cache" => precache(shell, args).await?,
        "list-cache" => list_cache(shell)?,
        "uncache" => uncache(shell, args)?,
        "find" => find(shell, args)?,
        other => {
            println!("Unknown command: /{other}");
            println!("Type /help for available commands.");
        }
    }
    Ok(ShellFlow::Continue)
}

/// Speak a plain line of input with the current user's voice.
pub(super) async fn speak_line(shell: &Shell, text: &str) -> AppResult<()> {
    let Some((user_id, user)) = current_user(shell)? else {
        return Ok(());
    };

    let audio = shell.speech.speak(&user_id, text, &user.voice_id).await?;
    if audio.source == AudioSource::Cache {
        println!("(cached)");
    }
    shell.player.play(&audio.bytes)?;
    Ok(())
}

async fn precache(shell: &Shell, phrase: &str) -> AppResult<()> {
    if phrase.is_empty() {
        println!("Usage: /cache <phrase>");
        return Ok(());
    }
    let Some((user_id, user)) = current_user(shell)? else {
        return Ok(());
    };

    match shell.speech.precache(&user_id, phrase, &user.voice_id).await? {
        PrecacheOutcome::AlreadyCached(_) => println!("Phrase already cached."),
        PrecacheOutcome::Generated(key) => println!("Phrase cached as '{key}'."),
    }
    Ok(())
}

fn list_cache(shell: &Shell) -> AppResult<()> {
    let Some((user_id, _)) = current_user(shell)? else {
        return Ok(());
    };

    let keys = shell.speech.list_cached(&user_id)?;
    if keys.is_empty() {
        println!("No cached phrases.");
    } else {
        println!("Cached phrases ({}):", keys.len());
        for key in keys {
            println!("  {key}");
        }
    }
    Ok(())
}

fn uncache(shell: &Shell, input: &str) -> AppResult<()> {
    if input.is_empty() {
        println!("Usage: /uncache <phrase-or-key>");
        return Ok(());
    }
    let Some((user_id, _)) = current_user(shell)? else {
        return Ok(());
    };

    // Normal path: the argument is a phrase. Fall back to treating it as a
    // literal key, so entries shown by /list-cache can be pasted back.
    let derived = CacheKey::derive(input);
    if shell.speech.delete_cached(&user_id, &derived)? {
        println!("Removed '{derived}'.");
        return Ok(());
    }
    if let Some(literal) = CacheKey::parse(input) {
        if literal != derived && shell.speech.delete_cached(&user_id, &literal)? {
            println!("Removed '{literal}'.");
            return Ok(());
        }
    }
    println!("No cache entry for '{derived}'.");
    Ok(())
}

/// Prefix search over the cached phrases, computed from the store listing on
/// every call rather than a shadow index.
fn find(shell: &Shell, prefix: &str) -> AppResult<()> {
    let Some((user_id, _)) = current_user(shell)? else {
        return Ok(());
    };

    let normalized = CacheKey::derive(prefix);
    let keys = shell.speech.list_cached(&user_id)?;
    let matches: Vec<_> = keys
        .iter()
        .filter(|k| k.as_str().starts_with(normalized.as_str()))
        .collect();

    if matches.is_empty() {
        println!("No cached phrases match.");
    } else {
        for key in matches {
            println!("  {}", key.as_str().replace('_', " "));
        }
    }
    Ok(())
}

fn list_users(shell: &Shell) -> AppResult<()> {
    let users = shell.users.list_users()?;
    if users.is_empty() {
        println!("No users configured.");
    } else {
        println!("Users:");
        for user in users {
            let marker = if user.is_current { " *" } else { "" };
            println!("  {}: {}{}", user.id, user.name, marker);
        }
    }
    Ok(())
}

fn switch_user(shell: &Shell, user_id: &str) -> AppResult<()> {
    if user_id.is_empty() {
        println!("Usage: /user <id>");
        return Ok(());
    }
    match shell.users.switch_user(user_id) {
        Ok(user) => println!("Switched to user: {}", user.name),
        Err(UserServiceError::NotFound) => println!("User '{user_id}' not found."),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn add_user(shell: &Shell, args: &str) -> AppResult<()> {
    let mut parts = args.splitn(3, char::is_whitespace);
    let (Some(id), Some(voice_id), Some(name)) = (parts.next(), parts.next(), parts.next())
    else {
        println!("Usage: /add <id> <voice_id> <name>");
        return Ok(());
    };

    let user = shell.users.add_user(id, voice_id, name)?;
    println!("Added user: {}", user.name);
    Ok(())
}

fn current_user(shell: &Shell) -> AppResult<Option<(String, User)>> {
    let current = shell.users.current_user()?;
    if current.is_none() {
        println!("No user selected. Use /add or /user first.");
    }
    Ok(current)
}

fn print_help() {
    println!(
        "
voicebox
========
Type text to speak it using the current user's voice.
Repeated phrases replay from the local cache without a network call.

Commands:
  /user <id>                  - Switch to user
  /users                      - List all users
  /add <id> <voice_id> <name> - Add a new user
  /cache <phrase>             - Pre-cache a phrase
  /list-cache                 - List cached phrases for current user
  /uncache <phrase-or-key>    - Remove a cached phrase
  /find <prefix>              - Search cached phrases by prefix
  /help                       - Show this help
  /quit                       - Exit
"
    );
}
