// Interface adapters: wire protocol, network handling and the default snapshot sink.

pub mod http;
pub mod log_sink;
pub mod net;
pub mod protocol;
pub mod state;
