/// Colour the backend uses as "no colour"; unreadable on the light notice.
const WHITE: &str = "#FFFFFF";
const BLACK: &str = "#000000";

/// Alpha suffix appended to a colour hint to get the message cell tint.
pub const TINT_ALPHA: &str = "20";

/// Latest known status of one mobile number, as received from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRecord {
    pub mobile_number: String,
    pub message: String,
    pub colour: String,
}

impl StatusRecord {
    pub fn new(
        mobile_number: impl Into<String>,
        message: impl Into<String>,
        colour: impl Into<String>,
    ) -> Self {
        Self {
            mobile_number: mobile_number.into(),
            message: message.into(),
            colour: colour.into(),
        }
    }
}

/// Ordered records in server response order. Replaced wholesale, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultSet {
    records: Vec<StatusRecord>,
}

impl ResultSet {
    pub fn new(records: Vec<StatusRecord>) -> Self {
        Self { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[StatusRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<StatusRecord>> for ResultSet {
    fn from(records: Vec<StatusRecord>) -> Self {
        Self::new(records)
    }
}

/// Transient notice shown after a successful single lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupNotice {
    pub record: StatusRecord,
    pub display_colour: String,
}

impl LookupNotice {
    pub fn from_record(record: StatusRecord) -> Self {
        let display_colour = display_colour(&record.colour);
        Self {
            record,
            display_colour,
        }
    }
}

/// Maps a colour hint to the colour used on the lookup notice.
pub fn display_colour(colour: &str) -> String {
    if colour.trim().eq_ignore_ascii_case(WHITE) {
        BLACK.to_string()
    } else {
        colour.to_string()
    }
}

/// Background tint for a message cell: the colour hint at low alpha.
pub fn tint_for(colour: &str) -> String {
    format!("{}{}", colour.trim(), TINT_ALPHA)
}
