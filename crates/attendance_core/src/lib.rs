pub mod domain;
pub mod ports;

pub use domain::{AttendanceRecord, AttendanceStatus, Field, NewAttendance, ValidationError};
pub use ports::{
    AttendanceGateway, AttendanceRepository, Clock, PortError, PortResult, SystemClock,
};
