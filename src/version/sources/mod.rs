//! Version source implementations

pub mod go_list;
pub mod go_proxy;

pub use go_list::GoListSource;
pub use go_proxy::GoProxySource;
