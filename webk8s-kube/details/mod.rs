pub use self::config_map::{ConfigMapDetail, config_map_detail};
pub use self::node::{NodeDetail, NodePod, node_detail};
pub use self::pod::{ContainerInfo, PodContainers, PodDetail, pod_containers, pod_detail, pod_events};
pub use self::service::{ServiceDetail, flatten_endpoints, service_detail};

mod config_map;
mod node;
mod pod;
mod service;

#[cfg(test)]
#[path = "./details.tests.rs"]
mod details_tests;
