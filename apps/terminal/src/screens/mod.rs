//! One module per screen, each adding methods to [`App`](crate::App).

mod creation;
mod play;
mod selection;
mod settings;
