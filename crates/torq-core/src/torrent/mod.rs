//! Torrent record and progress types shared by the store, scheduler,
//! lifecycle manager, and event stream.

mod info;
mod progress;
mod status;

pub use info::TorrentInfo;
pub use progress::Progress;
pub use status::Status;
