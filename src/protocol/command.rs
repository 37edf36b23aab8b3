//! Command and status definitions
//!
//! The command byte selects how a frame is interpreted; the status code is
//! what a RESPONSE frame carries in its length slot.

use std::fmt;

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    Response = 0,
    Register = 1,
    Login = 2,
    SaveProfile = 3,
    LoadProfile = 4,
    GetToken = 5,
    Ping = 6,
    Activate = 7,
    Deactivate = 8,
    Refresh = 9,
    GetGraphData = 10,
    GetGraphDataResponse = 11,
    Tweet = 12,
    Email = 13,
    Notify = 14,
    Bridge = 15,
    HardwareSync = 16,
    Internal = 17,
    Sms = 18,
    Property = 19,
    Hardware = 20,
}

impl Command {
    /// Map a raw command byte, `None` for bytes outside the vocabulary
    pub fn from_u8(value: u8) -> Option<Self> {
        let command = match value {
            0 => Command::Response,
            1 => Command::Register,
            2 => Command::Login,
            3 => Command::SaveProfile,
            4 => Command::LoadProfile,
            5 => Command::GetToken,
            6 => Command::Ping,
            7 => Command::Activate,
            8 => Command::Deactivate,
            9 => Command::Refresh,
            10 => Command::GetGraphData,
            11 => Command::GetGraphDataResponse,
            12 => Command::Tweet,
            13 => Command::Email,
            14 => Command::Notify,
            15 => Command::Bridge,
            16 => Command::HardwareSync,
            17 => Command::Internal,
            18 => Command::Sms,
            19 => Command::Property,
            20 => Command::Hardware,
            _ => return None,
        };
        Some(command)
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> Self {
        command as u8
    }
}

/// Status code carried in the length slot of a RESPONSE frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const SUCCESS: StatusCode = StatusCode(200);
    pub const QUOTA_LIMIT_EXCEPTION: StatusCode = StatusCode(1);
    pub const ILLEGAL_COMMAND: StatusCode = StatusCode(2);
    pub const NOT_REGISTERED: StatusCode = StatusCode(3);
    pub const ALREADY_REGISTERED: StatusCode = StatusCode(4);
    pub const NOT_AUTHENTICATED: StatusCode = StatusCode(5);
    pub const NOT_ALLOWED: StatusCode = StatusCode(6);
    pub const DEVICE_NOT_IN_NETWORK: StatusCode = StatusCode(7);
    pub const NO_ACTIVE_DASHBOARD: StatusCode = StatusCode(8);
    pub const INVALID_TOKEN: StatusCode = StatusCode(9);
    pub const ILLEGAL_COMMAND_BODY: StatusCode = StatusCode(11);
    pub const GET_GRAPH_DATA_EXCEPTION: StatusCode = StatusCode(12);
    pub const NTF_INVALID_BODY: StatusCode = StatusCode(13);
    pub const NTF_NOT_AUTHORIZED: StatusCode = StatusCode(14);
    pub const NTF_EXCEPTION: StatusCode = StatusCode(15);
    pub const TIMEOUT: StatusCode = StatusCode(16);
    pub const NO_DATA_EXCEPTION: StatusCode = StatusCode(17);
    pub const DEVICE_WENT_OFFLINE: StatusCode = StatusCode(18);
    pub const SERVER_EXCEPTION: StatusCode = StatusCode(19);
    pub const NOT_SUPPORTED_VERSION: StatusCode = StatusCode(20);
    pub const ENERGY_LIMIT: StatusCode = StatusCode(21);

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    /// Symbolic name, `None` for codes the client does not know
    pub fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            200 => "success",
            1 => "quota limit exceeded",
            2 => "illegal command",
            3 => "not registered",
            4 => "already registered",
            5 => "not authenticated",
            6 => "not allowed",
            7 => "device not in network",
            8 => "no active dashboard",
            9 => "invalid token",
            11 => "illegal command body",
            12 => "graph data exception",
            13 => "invalid notification body",
            14 => "notification not authorized",
            15 => "notification exception",
            16 => "timeout",
            17 => "no data",
            18 => "device went offline",
            19 => "server exception",
            20 => "protocol version not supported",
            21 => "energy limit",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", self.0, name),
            None => write!(f, "{}", self.0),
        }
    }
}
