//! Command-line argument dispatch and server initialization.
//!
//! This module maps validated CLI arguments to the appropriate action, such
//! as starting the API server with its full configuration state.

use crate::cli::actions::{Action, server::Args};
use anyhow::{Context, Result};

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let frontend_base_url = matches
        .get_one::<String>("frontend-base-url")
        .cloned()
        .context("missing required argument: --frontend-base-url")?;

    Ok(Action::Server(Args {
        port,
        frontend_base_url,
        session_ttl_seconds: arg_i64(matches, "session-ttl-seconds", 7_200),
        remember_me_ttl_seconds: arg_i64(matches, "remember-me-ttl-seconds", 2_592_000),
        email_token_ttl_seconds: arg_i64(matches, "email-token-ttl-seconds", 1_800),
        reset_token_ttl_seconds: arg_i64(matches, "reset-token-ttl-seconds", 1_800),
        email_resend_cooldown_seconds: arg_i64(matches, "email-resend-cooldown-seconds", 60),
        contact_inbox: matches
            .get_one::<String>("contact-inbox")
            .cloned()
            .unwrap_or_else(|| "support@honorarx.dev".to_string()),
        email_outbox_poll_seconds: arg_u64(matches, "email-outbox-poll-seconds", 5),
        email_outbox_batch_size: matches
            .get_one::<usize>("email-outbox-batch-size")
            .copied()
            .unwrap_or(10),
        email_outbox_max_attempts: matches
            .get_one::<u32>("email-outbox-max-attempts")
            .copied()
            .unwrap_or(5),
        email_outbox_backoff_base_seconds: arg_u64(matches, "email-outbox-backoff-base-seconds", 5),
        email_outbox_backoff_max_seconds: arg_u64(matches, "email-outbox-backoff-max-seconds", 300),
    }))
}

fn arg_i64(matches: &clap::ArgMatches, name: &str, default: i64) -> i64 {
    matches.get_one::<i64>(name).copied().unwrap_or(default)
}

fn arg_u64(matches: &clap::ArgMatches, name: &str, default: u64) -> u64 {
    matches.get_one::<u64>(name).copied().unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::actions::Action;

    #[test]
    fn handler_builds_server_args_from_defaults() {
        temp_env::with_vars(
            [
                ("HONORARX_PORT", None::<&str>),
                ("HONORARX_FRONTEND_BASE_URL", None::<&str>),
                ("HONORARX_SESSION_TTL_SECONDS", None::<&str>),
            ],
            || {
                let command = crate::cli::commands::new();
                let matches = command.get_matches_from(vec!["honorarx"]);
                let action = handler(&matches).expect("dispatch");
                let Action::Server(args) = action;
                assert_eq!(args.port, 8080);
                assert_eq!(args.frontend_base_url, "https://honorarx.dev");
                assert_eq!(args.session_ttl_seconds, 7_200);
                assert_eq!(args.remember_me_ttl_seconds, 2_592_000);
                assert_eq!(args.email_outbox_batch_size, 10);
            },
        );
    }

    #[test]
    fn handler_honors_overrides() {
        let command = crate::cli::commands::new();
        let matches = command.get_matches_from(vec![
            "honorarx",
            "--port",
            "9999",
            "--frontend-base-url",
            "http://localhost:8081",
            "--session-ttl-seconds",
            "600",
            "--contact-inbox",
            "desk@test",
        ]);
        let Action::Server(args) = handler(&matches).expect("dispatch");
        assert_eq!(args.port, 9999);
        assert_eq!(args.frontend_base_url, "http://localhost:8081");
        assert_eq!(args.session_ttl_seconds, 600);
        assert_eq!(args.contact_inbox, "desk@test");
    }
}
