// Module exports for CLI subcommands
//
// Each module handles a group of related subcommands. main.rs parses the
// arguments, loads the network once and dispatches to these handlers.

pub mod cities;
pub mod network;
pub mod stats;
