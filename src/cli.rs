use lexopt::{Arg, Parser};
use std::path::PathBuf;

/// What the command line asked for
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Arguments {
    Run { config: Option<PathBuf> },
    Help,
    Version,
}

impl Arguments {
    pub(crate) fn from_parser(mut parser: Parser) -> Result<Arguments, lexopt::Error> {
        let mut config = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Arguments::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Arguments::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Arguments::Run { config })
    }
}

pub(crate) const USAGE: &str = concat!(
    "Usage: ",
    env!("CARGO_PKG_NAME"),
    " [-c|--config <file>]\n",
    "\n",
    "Play snake in the terminal\n",
    "\n",
    "Options:\n",
    "  -c, --config <file>  Read configuration from the given file\n",
    "  -h, --help           Show this help and exit\n",
    "  -V, --version        Show the program version and exit\n",
);
