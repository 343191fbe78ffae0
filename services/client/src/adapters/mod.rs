pub mod http;

pub use http::HttpAttendanceGateway;
