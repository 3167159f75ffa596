//! Command-line surface

use agency_list::ViewerRole;
use agency_model::ResourceKind;
use agency_query::SortKey;
use clap::error::ErrorKind;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;

/// Parsed command line
#[derive(Debug, Clone, PartialEq)]
pub struct Cli {
    /// `--config` path, if given
    pub config: Option<PathBuf>,
    /// Subcommand to run
    pub invocation: Invocation,
}

/// Which subcommand to run, with its arguments
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    /// `agency list`
    List(ListArgs),
    /// `agency slug`
    Slug {
        /// Title to slugify
        title: String,
        /// Slugs already taken
        existing: Vec<String>,
    },
    /// `agency reading-time`
    ReadingTime {
        /// Markdown file to measure
        file: PathBuf,
    },
    /// `agency orphans`
    Orphans {
        /// JSON fixture used instead of the backend
        fixture: Option<PathBuf>,
        /// Print JSON instead of lines
        json: bool,
    },
}

/// Arguments of `agency list`
#[derive(Debug, Clone, PartialEq)]
pub struct ListArgs {
    /// Collection to list
    pub kind: ResourceKind,
    /// Free-text search
    pub search: Option<String>,
    /// Raw `field=value` expressions
    pub filters: Vec<String>,
    /// Ordering
    pub sort: SortKey,
    /// 1-based page, clamped by the controller
    pub page: usize,
    /// Falls back to `list.page_size`
    pub page_size: Option<usize>,
    /// Viewer whose visibility rules apply
    pub role: ViewerRole,
    /// JSON fixture used instead of the backend
    pub fixture: Option<PathBuf>,
    /// Print the snapshot as JSON
    pub json: bool,
}

impl ListArgs {
    /// List every item of a kind with default options
    #[must_use]
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            search: None,
            filters: Vec::new(),
            sort: SortKey::default(),
            page: 1,
            page_size: None,
            role: ViewerRole::default(),
            fixture: None,
            json: false,
        }
    }
}

/// Full command tree
#[must_use]
pub fn command() -> Command {
    Command::new("agency")
        .version(crate::VERSION)
        .about("Browse agency content collections")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Configuration file (defaults to ./agency.toml when present)"),
        )
        .subcommand(
            Command::new("list")
                .about("Load a collection and print one page of it")
                .arg(
                    Arg::new("kind")
                        .required(true)
                        .value_parser(ResourceKind::from_str)
                        .help("Collection, e.g. jobs, blog_posts or media"),
                )
                .arg(
                    Arg::new("search")
                        .long("search")
                        .short('s')
                        .help("Case-insensitive text search"),
                )
                .arg(
                    Arg::new("filter")
                        .long("filter")
                        .short('f')
                        .value_name("FIELD=VALUE")
                        .action(ArgAction::Append)
                        .help("Exact-match filter, repeatable; VALUE 'all' disables it"),
                )
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .default_value("newest")
                        .value_parser(SortKey::from_str)
                        .help("newest, oldest or title"),
                )
                .arg(
                    Arg::new("page")
                        .long("page")
                        .default_value("1")
                        .value_parser(value_parser!(usize))
                        .help("Page number, clamped into range"),
                )
                .arg(
                    Arg::new("page-size")
                        .long("page-size")
                        .value_parser(value_parser!(usize))
                        .help("Items per page"),
                )
                .arg(
                    Arg::new("role")
                        .long("role")
                        .default_value("public")
                        .value_parser(ViewerRole::from_str)
                        .help("public, editor or admin"),
                )
                .arg(fixture_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("slug")
                .about("Derive a URL slug from a title")
                .arg(Arg::new("title").required(true))
                .arg(
                    Arg::new("existing")
                        .long("existing")
                        .value_name("SLUG")
                        .action(ArgAction::Append)
                        .help("Slug already taken, repeatable"),
                ),
        )
        .subcommand(
            Command::new("reading-time")
                .about("Estimate reading time of a markdown file")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("orphans")
                .about("List media assets no post, project or service references")
                .arg(fixture_arg())
                .arg(json_arg()),
        )
}

fn fixture_arg() -> Arg {
    Arg::new("fixture")
        .long("fixture")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Read collections from a JSON fixture instead of the backend")
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}

impl Cli {
    /// Parse an argument list (first item is the program name)
    ///
    /// # Errors
    /// Returns the clap error for usage problems, `--help` and `--version`
    pub fn parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = command().try_get_matches_from(args)?;
        Self::from_matches(&matches)
    }

    /// Build from already-parsed matches
    ///
    /// # Errors
    /// Returns a clap error if a required value is absent
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let config = matches.get_one::<PathBuf>("config").cloned();
        let invocation = match matches.subcommand() {
            Some(("list", args)) => Invocation::List(ListArgs {
                kind: required(args, "kind")?,
                search: args.get_one::<String>("search").cloned(),
                filters: strings(args, "filter"),
                sort: required(args, "sort")?,
                page: required(args, "page")?,
                page_size: args.get_one::<usize>("page-size").copied(),
                role: required(args, "role")?,
                fixture: args.get_one::<PathBuf>("fixture").cloned(),
                json: args.get_flag("json"),
            }),
            Some(("slug", args)) => Invocation::Slug {
                title: required(args, "title")?,
                existing: strings(args, "existing"),
            },
            Some(("reading-time", args)) => Invocation::ReadingTime {
                file: required(args, "file")?,
            },
            Some(("orphans", args)) => Invocation::Orphans {
                fixture: args.get_one::<PathBuf>("fixture").cloned(),
                json: args.get_flag("json"),
            },
            _ => {
                return Err(clap::Error::raw(
                    ErrorKind::MissingSubcommand,
                    "a subcommand is required\n",
                ))
            }
        };
        Ok(Self { config, invocation })
    }
}

fn required<T>(matches: &ArgMatches, id: &str) -> Result<T, clap::Error>
where
    T: Clone + Send + Sync + 'static,
{
    matches.get_one::<T>(id).cloned().ok_or_else(|| {
        clap::Error::raw(
            ErrorKind::MissingRequiredArgument,
            format!("missing required argument '{id}'\n"),
        )
    })
}

fn strings(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}
