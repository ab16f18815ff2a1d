pub mod name_entry;
pub mod session;

pub use name_entry::NameEntry;
pub use session::Session;

/// What the frame loop runs each tick
///
/// `Playing` advances the simulation; a collision switches to `NameEntry`,
/// and confirming the name starts a new run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Playing,
    NameEntry,
}
