use std::fmt;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
pub struct SoneId(pub String);

impl fmt::Display for SoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Unknown,
    Idle,
    Inserting,
    Downloading,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Unknown,
        Status::Idle,
        Status::Inserting,
        Status::Downloading,
    ];

    /// Name of the status as sent on the wire, which is also the css class
    /// flagging it on a sone element
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Unknown => "unknown",
            Status::Idle => "idle",
            Status::Inserting => "inserting",
            Status::Downloading => "downloading",
        }
    }

    /// Whether the sone is currently being inserted or downloaded
    pub fn is_transitional(&self) -> bool {
        matches!(self, Status::Inserting | Status::Downloading)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a `getSoneStatus` response
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct SoneStatus {
    pub name: String,
    pub status: Status,
    pub modified: bool,

    /// Already formatted for display by the server
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
}

impl SoneStatus {
    /// Whether this sone is likely to change again soon
    pub fn is_busy(&self) -> bool {
        self.modified || self.status.is_transitional()
    }
}
