use lexopt::{Arg, Parser, ValueExt};
use std::path::PathBuf;

pub(crate) const USAGE: &str = concat!(
    "Usage: gridsnake [<options>]\n",
    "\n",
    "Play snake on a wraparound grid in the terminal.\n",
    "\n",
    "Options:\n",
    "  -c, --config <PATH>    Read configuration from <PATH>\n",
    "      --log-file <PATH>  Write log messages to <PATH>\n",
    "      --seed <N>         Seed the random number generator with <N>\n",
    "      --rows <N>         Number of rows in the grid\n",
    "      --cols <N>         Number of columns in the grid\n",
    "      --block-size <N>   Side length of a grid cell\n",
    "  -h, --help             Display this help message and exit\n",
    "  -V, --version          Show the program version and exit\n",
);

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Run(Arguments),
    Help,
    Version,
}

impl Command {
    pub(crate) fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => args.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Long("seed") => args.seed = Some(parser.value()?.parse()?),
                Arg::Long("rows") => args.rows = Some(parser.value()?.parse()?),
                Arg::Long("cols") => args.cols = Some(parser.value()?.parse()?),
                Arg::Long("block-size") => args.block_size = Some(parser.value()?.parse()?),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(args))
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Arguments {
    pub(crate) config: Option<PathBuf>,
    pub(crate) log_file: Option<PathBuf>,
    pub(crate) seed: Option<u64>,
    pub(crate) rows: Option<u16>,
    pub(crate) cols: Option<u16>,
    pub(crate) block_size: Option<u16>,
}
