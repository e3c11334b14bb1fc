pub const HEADER_PHONE: &str = "PHONE";
pub const HEADER_STATUS: &str = "STATUS";

/// Row backgrounds for the phone column (light blue / light gray).
pub const EVEN_ROW_RGB: (u8, u8, u8) = (0xDB, 0xEA, 0xFE);
pub const ODD_ROW_RGB: (u8, u8, u8) = (0xF3, 0xF4, 0xF6);

pub const HELP: &str = "\
Commands:
  check <number>          look up one mobile number, e.g. check +9198XXXXXXXX
  bulk <n1,n2,...>        send comma-separated numbers for a later refresh
  refresh                 fetch the statuses of previously sent numbers
  dismiss                 close the lookup notice
  help                    show this text
  quit                    exit once the current request has finished";
