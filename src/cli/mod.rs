mod args;
mod commands;
mod inputs;

pub use args::Cli;

#[cfg(test)]
mod tests;
