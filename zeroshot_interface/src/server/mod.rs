pub mod args;
pub mod handle;
pub mod ipc;
pub mod launcher;
pub mod process;
