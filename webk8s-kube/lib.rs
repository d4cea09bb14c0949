pub use self::client::{ClientError, ClientOptions, ClusterClientProvider, ClusterHandle};
pub use self::errors::ClusterError;
pub use self::kind::{RESOURCE_KINDS, ResourceKind};
pub use self::namespaces::list_namespaces;
pub use self::resources::{ResourceRow, ResourceStatus};

pub mod details;
pub mod logs;
pub mod metrics;
pub mod resources;
pub mod utils;

mod client;
mod errors;
mod kind;
mod namespaces;

#[cfg(test)]
mod testing;
