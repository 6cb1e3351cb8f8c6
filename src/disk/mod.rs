pub mod host;
pub mod init;
pub mod metadata;

pub use host::{HostFs, LocalHostFs};
pub use metadata::{MetadataFile, MetadataHeader};
