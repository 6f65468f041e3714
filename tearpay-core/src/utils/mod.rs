pub mod account_format;
