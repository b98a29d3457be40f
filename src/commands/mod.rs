use std::path::PathBuf;

use stac::{Config, Handle, Read, Reader, Stac};

pub type CmdResult<T> = stac::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn load_config(&self) -> stac::Result<Config> {
        Config::load(self.config.as_deref())
    }
}

/// Reads `href` with a configured reader and builds the tree that holds it.
pub(crate) fn open_tree(href: &str, config: &Config) -> stac::Result<(Stac<Reader>, Handle)> {
    let reader = Reader::new(config);
    let href_object = reader.read(href)?;
    Stac::new_with_reader(href_object, reader)
}

pub mod layout;
pub mod read;
pub mod walk;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (stac::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Read(args) => dispatch!(args, global, read),
        crate::Commands::Walk(args) => dispatch!(args, global, walk),
        crate::Commands::Layout(args) => dispatch!(args, global, layout),
    }
}
