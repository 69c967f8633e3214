use serde::{Deserialize, Serialize};

/// Control service id of the "marker" control response.
pub const MARKER_SERVICE_ID: u32 = 0xF04;

/// Sender identifiers reserved for comments written directly into the log.
pub const COMMENT_APP_ID: &str = "USER";
pub const COMMENT_CONTEXT_ID: &str = "CMNT";

/// Log level of a decoded record.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Verbose,
}

impl Severity {
    /// Lowercase name as shown in the subtype column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fatal => "fatal",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Verbose => "verbose",
        }
    }
}

/// Columns of the log table.
///
/// `Arg(n)` is the n-th (zero-based) payload argument.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Column {
    Index,
    Time,
    TimeStamp,
    Counter,
    EcuId,
    AppId,
    ContextId,
    SessionId,
    Type,
    Subtype,
    Mode,
    ArgCount,
    Payload,
    MessageId,
    Arg(u16),
}

impl Column {
    /// Fixed columns in display order (argument columns excluded).
    pub const FIXED: [Self; 14] = [
        Self::Index,
        Self::Time,
        Self::TimeStamp,
        Self::Counter,
        Self::EcuId,
        Self::AppId,
        Self::ContextId,
        Self::SessionId,
        Self::Type,
        Self::Subtype,
        Self::Mode,
        Self::ArgCount,
        Self::Payload,
        Self::MessageId,
    ];

    /// Header label.
    pub fn name(self) -> String {
        match self {
            Self::Index => "Index".to_string(),
            Self::Time => "Time".to_string(),
            Self::TimeStamp => "Timestamp".to_string(),
            Self::Counter => "Count".to_string(),
            Self::EcuId => "Ecuid".to_string(),
            Self::AppId => "Apid".to_string(),
            Self::ContextId => "Ctid".to_string(),
            Self::SessionId => "SessionId".to_string(),
            Self::Type => "Type".to_string(),
            Self::Subtype => "Subtype".to_string(),
            Self::Mode => "Mode".to_string(),
            Self::ArgCount => "#Args".to_string(),
            Self::Payload => "Payload".to_string(),
            Self::MessageId => "MsgId".to_string(),
            Self::Arg(n) => format!("Arg{n}"),
        }
    }
}

/// The facts about a decoded record that the row core needs.
///
/// Decoding itself and column text formatting belong to the decoder; the core
/// only asks for what drives highlighting and the fixed-text rows.
pub trait DecodedRecord {
    fn app_id(&self) -> &str;
    fn context_id(&self) -> &str;

    /// Log level, `None` for non-log records.
    fn severity(&self) -> Option<Severity>;

    /// Service id if this record is a control response.
    fn control_service_id(&self) -> Option<u32>;

    /// Display text for a column, `None` if the record has nothing to show.
    fn field(&self, column: Column) -> Option<String>;

    /// Comment embedded directly in the raw stream by the logging tool.
    fn is_embedded_comment(&self) -> bool {
        self.app_id() == COMMENT_APP_ID && self.context_id() == COMMENT_CONTEXT_ID
    }
}
