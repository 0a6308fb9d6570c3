use clap::error::ErrorKind;
use clap::{ArgAction, Args as ClapArgs, CommandFactory, Parser, Subcommand};
use gg_lib::{ListOptions, SortKey, VisibilityFilter, DEFAULT_API_URL};
use std::ffi::OsString;

/// Long flags that may also be written with a single dash, e.g. `-public`.
const SINGLE_DASH_FLAGS: [&str; 6] = [
    "public",
    "private",
    "includeforks",
    "includearchived",
    "sortby",
    "help",
];

#[derive(Debug, Parser)]
#[clap(name = "gg", about = "GitHub command-line helper")]
pub struct Args {
    #[clap(
        long = "api-url",
        help = "GitHub REST API base URL",
        env = "GG_API_URL",
        default_value = DEFAULT_API_URL,
        global = true
    )]
    pub api_url: String,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[clap(name = "repos", about = "list repositories")]
    Repos(ReposArgs),
}

#[derive(Debug, ClapArgs)]
pub struct ReposArgs {
    #[clap(
        short = 'u',
        value_name = "USER",
        help = "Username (if different from credentials)"
    )]
    pub user: Option<String>,

    #[clap(
        long = "public",
        help = "Only include public repos",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        default_value = "false",
        action = ArgAction::Set
    )]
    pub public: bool,

    #[clap(
        long = "private",
        help = "Only include private repos",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        default_value = "false",
        action = ArgAction::Set
    )]
    pub private: bool,

    #[clap(
        long = "includeforks",
        help = "Include forked repos",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        default_value = "false",
        action = ArgAction::Set
    )]
    pub include_forks: bool,

    #[clap(
        long = "includearchived",
        help = "Include archived repos",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        default_value = "false",
        action = ArgAction::Set
    )]
    pub include_archived: bool,

    #[clap(
        long = "sortby",
        value_name = "FIELD",
        help = "Sort by field: one of name, created, updated, pushed",
        value_parser = |s: &str| s.parse::<SortKey>(),
        default_value = "name"
    )]
    pub sort_by: SortKey,
}

impl Args {
    /// Parses the command line, accepting single-dash long flags.
    ///
    /// `-public` and `-private` conflict only when both are true, so
    /// `-public=false -private` is accepted.
    pub fn parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args = Self::try_parse_from(normalize_flags(args))?;
        match &args.command {
            Command::Repos(repos) if repos.public && repos.private => Err(Self::command().error(
                ErrorKind::ArgumentConflict,
                "Only one of -public and -private may be given",
            )),
            Command::Repos(_) => Ok(args),
        }
    }
}

/// Renders a parse error, adding the `repos` usage line to errors that
/// clap reports without one.
pub fn render_parse_error(e: &clap::Error) -> String {
    let mut text = e.render().to_string();
    if e.use_stderr() && !text.contains("Usage:") {
        let mut command = Args::command();
        command.build();
        if let Some(repos) = command.find_subcommand_mut("repos") {
            text.push_str(&format!("\n{}\n", repos.render_usage()));
        }
    }
    text
}

impl ReposArgs {
    /// Only valid once [`Args::parse_from_args`] has rejected `-public`
    /// together with `-private`.
    pub fn list_options(&self) -> ListOptions {
        let visibility = match (self.public, self.private) {
            (true, _) => VisibilityFilter::PublicOnly,
            (_, true) => VisibilityFilter::PrivateOnly,
            _ => VisibilityFilter::Any,
        };

        ListOptions {
            user: self.user.clone(),
            visibility,
            include_forks: self.include_forks,
            include_archived: self.include_archived,
            sort: self.sort_by,
        }
    }
}

/// Rewrites `-name` and `-name=value` to `--name` forms for the long flags
/// the tool has always accepted with one dash.
pub fn normalize_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            let Some(s) = arg.to_str() else {
                return arg
            };
            let Some(flag) = s.strip_prefix('-').filter(|f| !f.starts_with('-')) else {
                return arg
            };
            let name = flag.split_once('=').map_or(flag, |(n, _)| n);
            if SINGLE_DASH_FLAGS.contains(&name) {
                OsString::from(format!("-{s}"))
            } else {
                arg
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::parse_from_args(args.iter().copied())
    }

    fn repos(args: &[&str]) -> ReposArgs {
        let Command::Repos(repos) = parse(args).unwrap().command;
        repos
    }

    #[test]
    fn single_dash_long_flags_are_rewritten() {
        assert_eq!(
            vec!["gg", "repos", "--public", "--sortby=pushed", "-u", "octocat", "-x"],
            normalize_flags(["gg", "repos", "-public", "-sortby=pushed", "-u", "octocat", "-x"])
                .iter()
                .map(|a| a.to_str().unwrap())
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn defaults() {
        let options = repos(&["gg", "repos"]).list_options();
        assert_eq!(ListOptions::default(), options);
    }

    #[test]
    fn all_flags() {
        let options = repos(&[
            "gg",
            "repos",
            "-u",
            "octocat",
            "-private",
            "-includeforks",
            "-includearchived",
            "-sortby",
            "created",
        ])
        .list_options();

        assert_eq!(
            ListOptions {
                user: Some(String::from("octocat")),
                visibility: VisibilityFilter::PrivateOnly,
                include_forks: true,
                include_archived: true,
                sort: SortKey::Created,
            },
            options
        );
    }

    #[test]
    fn public_only() {
        let options = repos(&["gg", "repos", "--public"]).list_options();
        assert_eq!(VisibilityFilter::PublicOnly, options.visibility);
    }

    #[test]
    fn public_and_private_conflict() {
        let e = parse(&["gg", "repos", "-public", "-private"]).unwrap_err();
        assert_eq!(ErrorKind::ArgumentConflict, e.kind());
    }

    #[test]
    fn explicit_bool_values_are_accepted() {
        let options = repos(&[
            "gg",
            "repos",
            "-includeforks=false",
            "-includearchived=true",
            "-public=true",
        ])
        .list_options();

        assert!(!options.include_forks);
        assert!(options.include_archived);
        assert_eq!(VisibilityFilter::PublicOnly, options.visibility);
    }

    #[test]
    fn public_false_does_not_conflict_with_private() {
        let options = repos(&["gg", "repos", "-public=false", "-private"]).list_options();
        assert_eq!(VisibilityFilter::PrivateOnly, options.visibility);
    }

    #[test]
    fn public_and_private_both_true_conflict() {
        let e = parse(&["gg", "repos", "-public=true", "-private=true"]).unwrap_err();
        assert_eq!(ErrorKind::ArgumentConflict, e.kind());
        assert!(render_parse_error(&e).contains("Usage: gg repos"));
    }

    #[test]
    fn unknown_sort_key_is_rejected_with_usage() {
        let e = parse(&["gg", "repos", "-sortby", "stars"]).unwrap_err();
        assert_eq!(ErrorKind::ValueValidation, e.kind());

        let text = render_parse_error(&e);
        assert!(text.contains("stars"));
        assert!(text.contains("Usage: gg repos"));
    }

    #[test]
    fn usage_is_not_repeated() {
        let e = parse(&["gg", "repos", "extra"]).unwrap_err();
        assert_eq!(1, render_parse_error(&e).matches("Usage:").count());
    }

    #[test]
    fn help_is_not_an_error() {
        let e = parse(&["gg", "repos", "-help"]).unwrap_err();
        assert!(!e.use_stderr());
        assert!(!render_parse_error(&e).contains("error:"));
    }

    #[test]
    fn extra_arguments_are_rejected() {
        assert!(parse(&["gg", "repos", "extra"]).is_err());
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        let e = parse(&["gg", "issues"]).unwrap_err();
        assert_eq!(ErrorKind::InvalidSubcommand, e.kind());
    }
}
