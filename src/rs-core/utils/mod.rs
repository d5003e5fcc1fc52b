pub mod logger;
pub(crate) mod time_format;
pub(crate) mod time_ranges;
