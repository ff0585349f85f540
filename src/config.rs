use std::ffi::OsString;

use clap::Parser;

pub const DEFAULT_ISSUER: &str = "https://appleid.apple.com";
pub const DEFAULT_AUDIENCE: &str = "com.fake.fake.AppleSignIn";
pub const DEFAULT_SUBJECT: &str = "Test User";
pub const DEFAULT_EMAIL: &str = "test@example.com";

const USAGE_EXAMPLES: &str = "\
Example usages:
  Generate a default, valid token:
    jwtgen
  Generate a default, valid token, and pretty-print debug information:
    jwtgen --debug -pp
  Generate an expired token for cole@test.com:
    jwtgen --expired --email=cole@test.com
  Print the key set that verifies generated tokens:
    jwtgen --jwks --pp";

/// Long flags that take a value.
const VALUE_FLAGS: [&str; 5] = ["iss", "aud", "sub", "email", "error"];

/// Long flags that are switches.
const SWITCH_FLAGS: [&str; 6] = ["expired", "pp", "debug", "jwks", "help", "version"];

/// Rewrite `-name` and `-name=value` to `--name` forms for known long
/// flags, so single-dash invocations like `-expired -email=x` parse.
/// Arguments consumed as a flag's value, and everything after `--`, are
/// left untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut expects_value = false;
    let mut passthrough = false;

    for arg in args.into_iter().map(Into::into) {
        if passthrough || expects_value {
            expects_value = false;
            normalized.push(arg);
            continue;
        }
        let Some(text) = arg.to_str() else {
            normalized.push(arg);
            continue;
        };
        if text == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }

        let flag = text.strip_prefix("--").or_else(|| text.strip_prefix('-'));
        let Some(flag) = flag else {
            normalized.push(arg);
            continue;
        };
        let (name, inline_value) = match flag.split_once('=') {
            Some((name, _)) => (name, true),
            None => (flag, false),
        };
        let known = VALUE_FLAGS.contains(&name) || SWITCH_FLAGS.contains(&name);

        expects_value = VALUE_FLAGS.contains(&name) && !inline_value;
        if known && !text.starts_with("--") {
            normalized.push(OsString::from(format!("-{text}")));
        } else {
            normalized.push(arg);
        }
    }

    normalized
}

impl Args {
    /// Parse the process arguments, accepting single-dash long flags.
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }
}

/// Generate signed identity tokens for local testing.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, after_help = USAGE_EXAMPLES)]
pub struct Args {
    /// Issuer for token
    #[arg(long, default_value = DEFAULT_ISSUER)]
    pub iss: String,

    /// Audience for token
    #[arg(long, default_value = DEFAULT_AUDIENCE)]
    pub aud: String,

    /// Should the token be expired
    #[arg(long)]
    pub expired: bool,

    /// Subject of the token
    #[arg(long, default_value = DEFAULT_SUBJECT)]
    pub sub: String,

    /// Email of user
    #[arg(long, default_value = DEFAULT_EMAIL)]
    pub email: String,

    /// Error code to place in this token (e.g. invalid_grant)
    #[arg(long, default_value = "")]
    pub error: String,

    /// Pretty print JSON output
    #[arg(long)]
    pub pp: bool,

    /// Print the token header and claims as JSON before signing
    #[arg(long)]
    pub debug: bool,

    /// Print the JSON Web Key Set for the signing key instead of a token
    #[arg(long)]
    pub jwks: bool,
}

/// What to produce on this invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Token,
    Jwks,
}

/// Settings for a single invocation, built once from [`Args`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub issuer: String,
    pub audience: String,
    pub expired: bool,
    pub subject: String,
    pub email: String,
    /// Raw requested error code; empty when none was requested.
    pub error: String,
    pub pretty: bool,
    pub debug: bool,
    pub mode: Mode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            issuer: DEFAULT_ISSUER.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
            expired: false,
            subject: DEFAULT_SUBJECT.to_string(),
            email: DEFAULT_EMAIL.to_string(),
            error: String::new(),
            pretty: false,
            debug: false,
            mode: Mode::Token,
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            issuer: args.iss,
            audience: args.aud,
            expired: args.expired,
            subject: args.sub,
            email: args.email,
            error: args.error,
            pretty: args.pp,
            debug: args.debug,
            mode: if args.jwks { Mode::Jwks } else { Mode::Token },
        }
    }
}
