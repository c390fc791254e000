#[path = "integration/common/mod.rs"]
mod common;

#[path = "integration/merge_flow.rs"]
mod merge_flow;

#[path = "integration/split_modes.rs"]
mod split_modes;

#[path = "integration/upload_checks.rs"]
mod upload_checks;

#[path = "integration/disk_io.rs"]
mod disk_io;
