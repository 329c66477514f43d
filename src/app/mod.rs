// Application layer: the interactive shell around the risk dispatcher.

pub mod shell;
