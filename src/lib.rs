pub mod cmd_options;
pub mod io;
pub mod record;
pub mod shogi;
pub mod timer;
