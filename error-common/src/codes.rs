// Error codes implementation
// Stable codes shown to operators and attached to structured log events

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
    pub const MISSING_REQUIRED_FIELD: &str = "VALIDATION_1002";
    pub const INVALID_FORMAT: &str = "VALIDATION_1003";
    pub const INVALID_NUMBER: &str = "VALIDATION_1004";
}

pub mod configuration {
    pub const SOURCE_UNREADABLE: &str = "CONFIG_5001";
    pub const INVALID_VALUE: &str = "CONFIG_5002";
}

pub mod system {
    pub const LOGGING_INIT_FAILED: &str = "SYS_6001";
    pub const SERIALIZATION_FAILED: &str = "SYS_6002";
    pub const INTERNAL: &str = "SYS_6999";
}
