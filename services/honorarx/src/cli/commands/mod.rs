pub mod auth;
pub mod logging;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("honorarx")
        .about("HonorarX API service")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("HONORARX_PORT")
                .value_parser(clap::value_parser!(u16)),
        );

    let command = auth::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "honorarx");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("HonorarX API service".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_check_port_and_urls() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "honorarx",
            "--port",
            "8081",
            "--frontend-base-url",
            "http://localhost:8081",
            "--session-ttl-seconds",
            "600",
        ]);

        assert_eq!(matches.get_one::<u16>("port").copied(), Some(8081));
        assert_eq!(
            matches.get_one::<String>("frontend-base-url").cloned(),
            Some("http://localhost:8081".to_string())
        );
        assert_eq!(
            matches.get_one::<i64>("session-ttl-seconds").copied(),
            Some(600)
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("HONORARX_PORT", Some("443")),
                ("HONORARX_FRONTEND_BASE_URL", Some("https://app.test")),
                ("HONORARX_REMEMBER_ME_TTL_SECONDS", Some("86400")),
                ("HONORARX_CONTACT_INBOX", Some("inbox@test")),
                ("HONORARX_LOG_LEVEL", Some("info")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["honorarx"]);
                assert_eq!(matches.get_one::<u16>("port").copied(), Some(443));
                assert_eq!(
                    matches.get_one::<String>("frontend-base-url").cloned(),
                    Some("https://app.test".to_string())
                );
                assert_eq!(
                    matches.get_one::<i64>("remember-me-ttl-seconds").copied(),
                    Some(86_400)
                );
                assert_eq!(
                    matches.get_one::<String>("contact-inbox").cloned(),
                    Some("inbox@test".to_string())
                );
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("HONORARX_LOG_LEVEL", Some(level))], || {
                let command = new();
                let matches = command.get_matches_from(vec!["honorarx"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("HONORARX_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["honorarx".to_string()];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    let v = format!("-{}", "v".repeat(index));
                    args.push(v);
                }

                let command = new();
                let matches = command.get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn outbox_args_have_defaults() {
        temp_env::with_vars(
            [
                ("HONORARX_EMAIL_OUTBOX_POLL_SECONDS", None::<&str>),
                ("HONORARX_EMAIL_OUTBOX_BATCH_SIZE", None::<&str>),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["honorarx"]);
                assert_eq!(
                    matches.get_one::<u64>("email-outbox-poll-seconds").copied(),
                    Some(5)
                );
                assert_eq!(
                    matches.get_one::<usize>("email-outbox-batch-size").copied(),
                    Some(10)
                );
                assert_eq!(
                    matches.get_one::<u32>("email-outbox-max-attempts").copied(),
                    Some(5)
                );
            },
        );
    }
}
